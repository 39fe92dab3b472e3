//! Mode indicator widget for the status bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::Widget,
};

use crate::mode::Mode;

/// Shows the current interaction mode as a colored badge:
/// - Normal: Blue
/// - Insert: Green
pub struct ModeIndicator {
    mode: Mode,
}

impl ModeIndicator {
    pub fn new(mode: Mode) -> Self {
        Self { mode }
    }

    pub fn mode_color(mode: Mode) -> Color {
        match mode {
            Mode::Normal => Color::Blue,
            Mode::Insert => Color::Green,
        }
    }

    fn style(&self) -> Style {
        Style::default()
            .fg(Color::White)
            .bg(Self::mode_color(self.mode))
            .add_modifier(Modifier::BOLD)
    }

    /// Render as a styled span (for embedding in other widgets).
    pub fn as_span(&self) -> Span<'static> {
        Span::styled(format!("[{}]", self.mode.short_code()), self.style())
    }
}

impl Widget for ModeIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = format!("[{}]", self.mode.short_code());

        // Only render if we have space
        if area.width >= text.len() as u16 && area.height >= 1 {
            buf.set_string(area.x, area.y, &text, self.style());
        }
    }
}
