//! Team editor view
//!
//! Static identity (name, secret key), the auto-accept checkboxes, the
//! avatar and bio inputs, the bio image picker and the Leave / Save buttons.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use scrim_core::{data_uri, SaveStatus, TeamEditor, TeamField, ToggleField};

use super::{button, field_box, FieldInput, InputTarget};

/// Focusable elements of the editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorFocus {
    Toggle(ToggleField),
    Field(TeamField),
    BioImage,
    Save,
    Leave,
}

const FOCUS_ORDER: [EditorFocus; 7] = [
    EditorFocus::Toggle(ToggleField::AutoAcceptUnranked),
    EditorFocus::Toggle(ToggleField::AutoAcceptRanked),
    EditorFocus::Field(TeamField::Avatar),
    EditorFocus::Field(TeamField::Bio),
    EditorFocus::BioImage,
    EditorFocus::Save,
    EditorFocus::Leave,
];

/// Editor view state
pub struct EditorView {
    pub selected: usize,
}

impl EditorView {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn focused(&self) -> EditorFocus {
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

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        editor: &TeamEditor,
        input: Option<&FieldInput>,
    ) {
        let block = Block::default()
            .title("Team Profile")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Name + secret key
                Constraint::Length(2), // Checkboxes
                Constraint::Length(3), // Avatar
                Constraint::Min(4),    // Bio
                Constraint::Length(3), // Bio image
                Constraint::Length(1), // Buttons
            ])
            .split(inner);

        self.render_identity(frame, chunks[0], editor);
        self.render_toggles(frame, chunks[1], editor);
        self.render_text(frame, chunks[2], TeamField::Avatar, editor, input);
        self.render_text(frame, chunks[3], TeamField::Bio, editor, input);
        self.render_bio_image(frame, chunks[4], input);
        self.render_buttons(frame, chunks[5], editor.save_status);
    }

    fn render_identity(&self, frame: &mut Frame, area: Rect, editor: &TeamEditor) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        let dim = Style::default().fg(Color::DarkGray);
        frame.render_widget(
            field_box("Team Name (static)", &editor.team.name, false).style(dim),
            cols[0],
        );
        frame.render_widget(
            field_box("Secret Key (static)", &editor.team.team_key, false).style(dim),
            cols[1],
        );
    }

    fn render_toggles(&self, frame: &mut Frame, area: Rect, editor: &TeamEditor) {
        let lines: Vec<Line> = [ToggleField::AutoAcceptUnranked, ToggleField::AutoAcceptRanked]
            .into_iter()
            .map(|field| {
                let mark = if editor.team.flag(field) { "[x] " } else { "[ ] " };
                let style = if self.focused() == EditorFocus::Toggle(field) {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                };
                Line::from(vec![Span::styled(mark, style), Span::raw(field.label())])
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_text(
        &self,
        frame: &mut Frame,
        area: Rect,
        field: TeamField,
        editor: &TeamEditor,
        input: Option<&FieldInput>,
    ) {
        if let Some(input) = input.filter(|input| input.target == InputTarget::Team(field)) {
            frame.render_widget(&input.textarea, area);
            return;
        }

        let value = editor.team.text(field);
        let shown = match data_uri::mime_of(value) {
            Some(mime) if field == TeamField::Bio => format!("[image: {}]", mime),
            _ => value.to_string(),
        };
        let focused = self.focused() == EditorFocus::Field(field);
        frame.render_widget(field_box(field.label(), &shown, focused), area);
    }

    fn render_bio_image(&self, frame: &mut Frame, area: Rect, input: Option<&FieldInput>) {
        match input {
            Some(input) if input.target == InputTarget::BioImagePath => {
                frame.render_widget(&input.textarea, area);
            }
            _ => {
                let focused = self.focused() == EditorFocus::BioImage;
                frame.render_widget(
                    field_box("Bio Image File", "Enter to pick a file", focused)
                        .style(Style::default().fg(Color::DarkGray)),
                    area,
                );
            }
        }
    }

    fn render_buttons(&self, frame: &mut Frame, area: Rect, status: SaveStatus) {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(18), Constraint::Min(0)])
            .split(area);

        frame.render_widget(
            button("Leave Team", Color::Red, self.focused() == EditorFocus::Leave),
            cols[0],
        );
        frame.render_widget(
            button(
                status.label(),
                save_color(status),
                self.focused() == EditorFocus::Save,
            ),
            cols[1],
        );
    }
}

impl Default for EditorView {
    fn default() -> Self {
        Self::new()
    }
}

fn save_color(status: SaveStatus) -> Color {
    match status {
        SaveStatus::Idle => Color::Blue,
        SaveStatus::Saving => Color::Yellow,
        SaveStatus::Success => Color::Green,
        SaveStatus::Failure => Color::Red,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::render_to_string;
    use scrim_core::TeamRecord;

    fn editor() -> TeamEditor {
        TeamEditor::new(TeamRecord {
            id: 7,
            name: "Falcons".to_string(),
            team_key: "k3y".to_string(),
            auto_accept_ranked: true,
            avatar: "https://example.com/a.png".to_string(),
            bio: "We scrim on weekends".to_string(),
            users: vec!["ada".to_string()],
            ..Default::default()
        })
    }

    fn rendered(editor: &TeamEditor, input: Option<&FieldInput>) -> String {
        let view = EditorView::new();
        render_to_string(80, 24, |frame| {
            view.render(frame, frame.area(), editor, input);
        })
    }

    #[test]
    fn test_focus_order() {
        let mut view = EditorView::new();
        assert_eq!(
            view.focused(),
            EditorFocus::Toggle(ToggleField::AutoAcceptUnranked)
        );
        for _ in 0..5 {
            view.next();
        }
        assert_eq!(view.focused(), EditorFocus::Save);
        view.next();
        view.next();
        assert_eq!(
            view.focused(),
            EditorFocus::Toggle(ToggleField::AutoAcceptUnranked)
        );
    }

    #[test]
    fn test_render_identity_and_checkboxes() {
        let text = rendered(&editor(), None);
        assert!(text.contains("Team Name (static)"));
        assert!(text.contains("Falcons"));
        assert!(text.contains("k3y"));
        assert!(text.contains("[ ] Auto-accept scrimmages."));
        assert!(text.contains("[x] Auto-accept ranked matches."));
        assert!(text.contains("We scrim on weekends"));
        assert!(text.contains("Leave Team"));
    }

    #[test]
    fn test_save_label_follows_status() {
        let mut editor = editor();
        assert!(rendered(&editor, None).contains("[ Update Info ]"));

        editor.save_status = SaveStatus::Saving;
        assert!(rendered(&editor, None).contains("[ Saving... ]"));

        editor.save_status = SaveStatus::Failure;
        assert!(rendered(&editor, None).contains("[ Failed ]"));
    }

    #[test]
    fn test_bio_image_summarized() {
        let mut editor = editor();
        editor.team.bio = "data:image/png;base64,iVBORw==".to_string();
        let text = rendered(&editor, None);
        assert!(text.contains("[image: image/png]"));
        assert!(!text.contains("iVBORw"));
    }

    #[test]
    fn test_open_input_replaces_field() {
        let input = FieldInput::new(InputTarget::Team(TeamField::Avatar), "new-avatar");
        let text = rendered(&editor(), Some(&input));
        assert!(text.contains("new-avatar"));
        assert!(!text.contains("https://example.com/a.png"));
    }
}
