//! Create / join view, shown while the user has no team
//!
//! Two cards stacked vertically:
//! - Create a Team: team name + Create
//! - Join a Team: secret key and team name + Join

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use scrim_core::{NoTeamField, NoTeamForm, ScreenError};

use super::{button, field_box, FieldInput, InputTarget};

/// Focusable elements of the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoTeamFocus {
    Field(NoTeamField),
    Create,
    Join,
}

const FOCUS_ORDER: [NoTeamFocus; 5] = [
    NoTeamFocus::Field(NoTeamField::TeamName),
    NoTeamFocus::Create,
    NoTeamFocus::Field(NoTeamField::SecretKey),
    NoTeamFocus::Field(NoTeamField::TeamJoinName),
    NoTeamFocus::Join,
];

/// Create / join view state
pub struct NoTeamView {
    pub selected: usize,
}

impl NoTeamView {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn focused(&self) -> NoTeamFocus {
        FOCUS_ORDER[self.selected]
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % FOCUS_ORDER.len();
    }

    pub fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = FOCUS_ORDER.len() - 1;
        }
    }

    /// Render the view; `input` is drawn in place of the field it edits
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &NoTeamForm,
        input: Option<&FieldInput>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Create card
                Constraint::Length(7), // Join card
                Constraint::Min(0),
            ])
            .split(area);

        self.render_create(frame, chunks[0], form, input);
        self.render_join(frame, chunks[1], form, input);
    }

    fn render_create(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &NoTeamForm,
        input: Option<&FieldInput>,
    ) {
        let block = Block::default().title("Create a Team").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Team name
                Constraint::Length(1), // Banner
                Constraint::Length(1), // Button
            ])
            .split(inner);

        self.render_field(frame, rows[0], NoTeamField::TeamName, form, input);
        render_banner(frame, rows[1], form.create_banner());
        frame.render_widget(
            button("Create", Color::Green, self.focused() == NoTeamFocus::Create),
            rows[2],
        );
    }

    fn render_join(
        &self,
        frame: &mut Frame,
        area: Rect,
        form: &NoTeamForm,
        input: Option<&FieldInput>,
    ) {
        let block = Block::default().title("Join a Team").borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Secret key + team name
                Constraint::Length(1), // Banner
                Constraint::Length(1), // Button
            ])
            .split(inner);

        let fields = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
            .split(rows[0]);

        self.render_field(frame, fields[0], NoTeamField::SecretKey, form, input);
        self.render_field(frame, fields[1], NoTeamField::TeamJoinName, form, input);
        render_banner(frame, rows[1], form.join_banner());
        frame.render_widget(
            button("Join", Color::Green, self.focused() == NoTeamFocus::Join),
            rows[2],
        );
    }

    fn render_field(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: NoTeamField,
        form: &NoTeamForm,
        input: Option<&FieldInput>,
    ) {
        match input {
            Some(input) if input.target == InputTarget::NoTeam(field) => {
                frame.render_widget(&input.textarea, area);
            }
            _ => {
                let focused = self.focused() == NoTeamFocus::Field(field);
                frame.render_widget(field_box(field.label(), form.value(field), focused), area);
            }
        }
    }
}

impl Default for NoTeamView {
    fn default() -> Self {
        Self::new()
    }
}

fn render_banner(frame: &mut Frame, area: Rect, error: Option<ScreenError>) {
    if let Some(error) = error {
        let banner = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(banner, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::render_to_string;

    #[test]
    fn test_focus_wraps() {
        let mut view = NoTeamView::new();
        view.prev();
        assert_eq!(view.focused(), NoTeamFocus::Join);
        view.next();
        assert_eq!(view.focused(), NoTeamFocus::Field(NoTeamField::TeamName));
        view.next();
        assert_eq!(view.focused(), NoTeamFocus::Create);
    }

    #[test]
    fn test_render_cards_and_values() {
        let view = NoTeamView::new();
        let form = NoTeamForm {
            team_name: "Falcons".to_string(),
            ..Default::default()
        };
        let text = render_to_string(80, 16, |frame| {
            view.render(frame, frame.area(), &form, None);
        });
        assert!(text.contains("Create a Team"));
        assert!(text.contains("Join a Team"));
        assert!(text.contains("Falcons"));
        assert!(!text.contains("Sorry"));
    }

    #[test]
    fn test_render_banners() {
        let view = NoTeamView::new();
        let form = NoTeamForm {
            create_error: true,
            join_error: true,
            ..Default::default()
        };
        let text = render_to_string(80, 16, |frame| {
            view.render(frame, frame.area(), &form, None);
        });
        assert!(text.contains("Sorry, this team name is already being used."));
        assert!(text.contains("Sorry, that team name and secret key combination is not valid."));
    }

    #[test]
    fn test_render_open_input() {
        let view = NoTeamView::new();
        let form = NoTeamForm::default();
        let input = FieldInput::new(InputTarget::NoTeam(NoTeamField::SecretKey), "typed");
        let text = render_to_string(80, 16, |frame| {
            view.render(frame, frame.area(), &form, Some(&input));
        });
        assert!(text.contains("typed"));
    }
}
