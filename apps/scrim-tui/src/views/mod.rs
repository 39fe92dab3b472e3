//! TUI views

mod editor;
mod no_team;

pub use editor::{EditorFocus, EditorView};
pub use no_team::{NoTeamFocus, NoTeamView};

use ratatui::{
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};
use tui_textarea::{CursorMove, TextArea};

use scrim_core::{NoTeamField, TeamField};

/// What an open text input writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputTarget {
    NoTeam(NoTeamField),
    Team(TeamField),
    /// Path of a local file to load as the bio image
    BioImagePath,
}

impl InputTarget {
    pub fn label(&self) -> &'static str {
        match self {
            InputTarget::NoTeam(field) => field.label(),
            InputTarget::Team(field) => field.label(),
            InputTarget::BioImagePath => "Bio Image File",
        }
    }

    pub fn is_multiline(&self) -> bool {
        matches!(self, InputTarget::Team(field) if field.is_multiline())
    }
}

/// A text input being edited in insert mode
pub struct FieldInput {
    pub target: InputTarget,
    pub textarea: TextArea<'static>,
}

impl FieldInput {
    /// Open an input seeded with the field's current value, cursor at the end
    pub fn new(target: InputTarget, value: &str) -> Self {
        let lines = value.split('\n').map(str::to_string).collect();
        let mut textarea = TextArea::new(lines);
        textarea.move_cursor(CursorMove::Bottom);
        textarea.move_cursor(CursorMove::End);
        textarea.set_cursor_line_style(Style::default());
        textarea.set_block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Green))
                .title(target.label()),
        );
        Self { target, textarea }
    }

    /// Full current value of the input
    pub fn value(&self) -> String {
        self.textarea.lines().join("\n")
    }
}

/// Bordered read-only box for a field value
fn field_box<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let border = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(label),
    )
}

/// One-line button label
fn button<'a>(label: &'a str, color: Color, focused: bool) -> Paragraph<'a> {
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if focused {
        style = style.add_modifier(Modifier::REVERSED);
    }
    Paragraph::new(format!("[ {} ]", label)).style(style)
}

#[cfg(test)]
pub(crate) fn render_to_string(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut ratatui::Frame),
) -> String {
    use ratatui::{backend::TestBackend, Terminal};

    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(draw).unwrap();
    let buffer = terminal.backend().buffer();
    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| buffer[(x, y)].symbol())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
