//! Application state and main render loop

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use scrim_core::{
    EditorAction, Membership, NoTeamAction, ScreenAction, Store, TeamField, ToggleField,
};

use crate::keybindings::{normal_mode_action, Action};
use crate::mode::Mode;
use crate::views::{EditorFocus, EditorView, FieldInput, InputTarget, NoTeamFocus, NoTeamView};
use crate::widgets::{ModeIndicator, TeamCard};

const HELP_TEXT: &str = r#"
Scrim - Help

Navigation:
  j/k, Up/Down, Tab - Move focus
  Enter   - Edit field / press button
  Esc     - Stop editing

Team profile:
  Space   - Flip the focused checkbox
  s       - Save the profile
  Enter on "Bio Image File" - pick a file, Enter again to load it

Other:
  r       - Refresh team state
  ?       - Toggle this help
  q       - Quit
"#;

/// Main application state
pub struct App {
    /// Screen state and effect runner
    pub store: Store,
    /// Current mode (NORMAL, INSERT)
    pub mode: Mode,
    pub no_team_view: NoTeamView,
    pub editor_view: EditorView,
    /// Text input open in insert mode
    pub input: Option<FieldInput>,
    /// Fetch epoch of the view the open input belongs to
    input_epoch: u64,
    /// Whether to show the help overlay
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
}

impl App {
    /// Create the app and start the membership lookup
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(mut store: Store) -> Self {
        store.mount();
        Self {
            store,
            mode: Mode::Normal,
            no_team_view: NoTeamView::new(),
            editor_view: EditorView::new(),
            input: None,
            input_epoch: 0,
            show_help: false,
            status_message: None,
        }
    }

    /// Apply finished effects; called once per frame
    ///
    /// An open input is closed once the view it edits was rebuilt, so stale
    /// text never overwrites a refetched record.
    pub fn tick(&mut self) {
        self.store.pump();
        let still_valid = self.input.as_ref().map_or(true, |input| {
            self.input_epoch == self.store.state().fetch_epoch()
                && self.target_mounted(input.target)
        });
        if !still_valid {
            self.close_input();
        }
    }

    /// Render the application
    pub fn render(&self, frame: &mut Frame) {
        let size = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Status bar
                Constraint::Min(0),    // Main content
                Constraint::Length(1), // Command line
            ])
            .split(size);

        self.render_status_bar(frame, chunks[0]);
        self.render_main_view(frame, chunks[1]);
        self.render_command_line(frame, chunks[2]);

        if self.show_help {
            self.render_help_overlay(frame, size);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let screen = match &self.store.state().membership {
            Membership::Unknown => "Loading",
            Membership::NoTeam(_) => "No Team",
            Membership::Team(_) => "Team",
        };

        let line = Line::from(vec![
            Span::raw(" "),
            ModeIndicator::new(self.mode).as_span(),
            Span::raw(" "),
            Span::styled(screen, Style::default().fg(Color::Cyan)),
            Span::raw(" | Press ? for help"),
        ]);

        let status_bar = Paragraph::new(line).style(Style::default().bg(Color::DarkGray));
        frame.render_widget(status_bar, area);
    }

    fn render_main_view(&self, frame: &mut Frame, area: Rect) {
        let input = self.input.as_ref();
        match &self.store.state().membership {
            Membership::Unknown => {}
            Membership::NoTeam(form) => {
                self.no_team_view.render(frame, area, form, input);
            }
            Membership::Team(editor) => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(66), Constraint::Percentage(34)])
                    .split(area);
                self.editor_view.render(frame, chunks[0], editor, input);
                frame.render_widget(TeamCard::new(&editor.team), chunks[1]);
            }
        }
    }

    fn render_command_line(&self, frame: &mut Frame, area: Rect) {
        if let Some(error) = self.store.state().fetch_error {
            let paragraph =
                Paragraph::new(format!("{} Press r to retry.", error)).style(Style::default().fg(Color::Red));
            frame.render_widget(paragraph, area);
            return;
        }

        let content = match self.mode {
            Mode::Insert => "Editing | Esc to finish".to_string(),
            Mode::Normal => self
                .status_message
                .clone()
                .unwrap_or_else(|| "j/k to move | Enter to select | q to quit".to_string()),
        };

        frame.render_widget(Paragraph::new(content), area);
    }

    fn render_help_overlay(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Help")
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black));

        let help_area = centered_rect(60, 70, area);
        frame.render_widget(Clear, help_area);
        frame.render_widget(Paragraph::new(HELP_TEXT).block(block), help_area);
    }

    /// Handle a key press, returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return false;
        }

        match self.mode {
            Mode::Normal => self.handle_normal_key(key.code),
            Mode::Insert => {
                self.handle_insert_key(key);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, code: KeyCode) -> bool {
        let Some(action) = normal_mode_action(code) else {
            return false;
        };

        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = true,
            Action::Cancel => self.status_message = None,
            Action::MoveDown => match &self.store.state().membership {
                Membership::NoTeam(_) => self.no_team_view.next(),
                Membership::Team(_) => self.editor_view.next(),
                Membership::Unknown => {}
            },
            Action::MoveUp => match &self.store.state().membership {
                Membership::NoTeam(_) => self.no_team_view.prev(),
                Membership::Team(_) => self.editor_view.prev(),
                Membership::Unknown => {}
            },
            Action::Activate => self.activate(),
            Action::Toggle => {
                if let EditorFocus::Toggle(field) = self.editor_view.focused() {
                    self.toggle(field);
                }
            }
            Action::Save => {
                if self.store.state().editor().is_some() {
                    self.store.dispatch(EditorAction::SaveStarted);
                }
            }
            Action::Refresh => {
                self.status_message = Some("Refreshing...".to_string());
                self.store.dispatch(ScreenAction::RefetchRoot);
            }
        }
        false
    }

    /// Press whatever has focus in the mounted view
    fn activate(&mut self) {
        let state = self.store.state();
        if state.no_team().is_some() {
            match self.no_team_view.focused() {
                NoTeamFocus::Field(field) => self.open_input(InputTarget::NoTeam(field)),
                NoTeamFocus::Create => self.store.dispatch(NoTeamAction::CreateSubmitted),
                NoTeamFocus::Join => self.store.dispatch(NoTeamAction::JoinSubmitted),
            }
        } else if state.editor().is_some() {
            match self.editor_view.focused() {
                EditorFocus::Toggle(field) => self.toggle(field),
                EditorFocus::Field(field) => self.open_input(InputTarget::Team(field)),
                EditorFocus::BioImage => self.open_input(InputTarget::BioImagePath),
                EditorFocus::Save => self.store.dispatch(EditorAction::SaveStarted),
                EditorFocus::Leave => self.store.dispatch(EditorAction::LeaveRequested),
            }
        }
    }

    fn toggle(&mut self, field: ToggleField) {
        if self.store.state().editor().is_some() {
            self.store.dispatch(EditorAction::ToggleChanged { field });
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        let Some(target) = self.input.as_ref().map(|input| input.target) else {
            self.mode = Mode::Normal;
            return;
        };

        match key.code {
            KeyCode::Esc => self.close_input(),
            KeyCode::Enter if target == InputTarget::BioImagePath => {
                let path = self.input_value().trim().to_string();
                self.close_input();
                if !path.is_empty() {
                    self.store.dispatch(EditorAction::BioImageRequested { path: path.into() });
                }
            }
            KeyCode::Enter if !target.is_multiline() => self.close_input(),
            KeyCode::Enter => {
                if let Some(input) = self.input.as_mut() {
                    input.textarea.insert_newline();
                }
                self.sync_input(target);
            }
            _ => {
                if let Some(input) = self.input.as_mut() {
                    input.textarea.input(key);
                }
                self.sync_input(target);
            }
        }
    }

    /// Push the input's current value into the screen state
    fn sync_input(&mut self, target: InputTarget) {
        let value = self.input_value();
        match target {
            InputTarget::NoTeam(field) => {
                self.store.dispatch(NoTeamAction::FieldChanged { field, value })
            }
            InputTarget::Team(field) => {
                self.store.dispatch(EditorAction::FieldChanged { field, value })
            }
            InputTarget::BioImagePath => {}
        }
    }

    fn input_value(&self) -> String {
        self.input
            .as_ref()
            .map(FieldInput::value)
            .unwrap_or_default()
    }

    fn open_input(&mut self, target: InputTarget) {
        let state = self.store.state();
        let value = match target {
            InputTarget::NoTeam(field) => state.no_team().map(|form| form.value(field)),
            InputTarget::Team(field) => state.editor().map(|editor| editor.team.text(field)),
            InputTarget::BioImagePath => Some(""),
        };
        let Some(value) = value else {
            return;
        };
        // Editing an uploaded image as text would start from the raw data URI
        let value = if target == InputTarget::Team(TeamField::Bio)
            && state.editor().is_some_and(|editor| editor.team.bio_is_image())
        {
            ""
        } else {
            value
        };

        self.input = Some(FieldInput::new(target, value));
        self.input_epoch = state.fetch_epoch();
        self.mode = Mode::Insert;
    }

    fn close_input(&mut self) {
        self.input = None;
        self.mode = Mode::Normal;
    }

    fn target_mounted(&self, target: InputTarget) -> bool {
        let state = self.store.state();
        match target {
            InputTarget::NoTeam(_) => state.no_team().is_some(),
            InputTarget::Team(_) | InputTarget::BioImagePath => state.editor().is_some(),
        }
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
