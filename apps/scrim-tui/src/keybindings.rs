//! Keybinding definitions

use crossterm::event::KeyCode;

/// Keybinding action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Move focus up
    MoveUp,
    /// Move focus down
    MoveDown,
    /// Edit the focused field or press the focused button
    Activate,
    /// Flip the focused checkbox
    Toggle,
    /// Save the team profile
    Save,
    /// Fetch the screen state again
    Refresh,
    /// Toggle help
    ToggleHelp,
    /// Close help
    Cancel,
}

/// Get the action for a key in normal mode
pub fn normal_mode_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::ToggleHelp),
        KeyCode::Char('j') | KeyCode::Down | KeyCode::Tab => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up | KeyCode::BackTab => Some(Action::MoveUp),
        KeyCode::Char(' ') => Some(Action::Toggle),
        KeyCode::Char('s') => Some(Action::Save),
        KeyCode::Char('r') => Some(Action::Refresh),
        KeyCode::Enter => Some(Action::Activate),
        KeyCode::Esc => Some(Action::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        assert_eq!(normal_mode_action(KeyCode::Char('j')), Some(Action::MoveDown));
        assert_eq!(normal_mode_action(KeyCode::Up), Some(Action::MoveUp));
        assert_eq!(normal_mode_action(KeyCode::Tab), Some(Action::MoveDown));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(normal_mode_action(KeyCode::Char('x')), None);
    }
}
