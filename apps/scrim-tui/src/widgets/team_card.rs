//! Read-only summary card of a team

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use scrim_core::data_uri;
use scrim_core::TeamRecord;

/// Number of bio lines shown on the card
const BIO_PREVIEW_LINES: usize = 3;

/// Compact summary of a (possibly unsaved) team record
pub struct TeamCard<'a> {
    team: &'a TeamRecord,
}

impl<'a> TeamCard<'a> {
    pub fn new(team: &'a TeamRecord) -> Self {
        Self { team }
    }

    /// Bio as shown on the card; uploaded images are summarized
    pub fn bio_preview(&self) -> Vec<String> {
        if let Some(mime) = data_uri::mime_of(&self.team.bio) {
            return vec![format!("[image: {}]", mime)];
        }
        self.team
            .bio
            .lines()
            .take(BIO_PREVIEW_LINES)
            .map(str::to_string)
            .collect()
    }

    fn flag_line(label: &'static str, on: bool) -> Line<'static> {
        let (mark, color) = if on {
            ("yes", Color::Green)
        } else {
            ("no", Color::Gray)
        };
        Line::from(vec![
            Span::raw(label),
            Span::styled(mark, Style::default().fg(color)),
        ])
    }
}

impl Widget for TeamCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let dim = Style::default().fg(Color::DarkGray);

        let mut lines = vec![
            Line::from(Span::styled(
                self.team.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                if self.team.avatar.is_empty() {
                    "(no avatar)".to_string()
                } else {
                    self.team.avatar.clone()
                },
                dim,
            )),
            Line::default(),
            Self::flag_line("Ranked auto-accept: ", self.team.auto_accept_ranked),
            Self::flag_line("Scrimmage auto-accept: ", self.team.auto_accept_unranked),
            Line::default(),
            Line::from(format!("Members ({})", self.team.users.len())),
        ];
        lines.extend(
            self.team
                .users
                .iter()
                .map(|user| Line::from(format!("  {}", user))),
        );
        lines.push(Line::default());
        lines.extend(self.bio_preview().into_iter().map(Line::from));

        Paragraph::new(lines)
            .block(Block::default().title("Team Card").borders(Borders::ALL))
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
