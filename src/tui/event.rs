//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::StudyError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Tear the cycle down and leave.
    Quit,
    /// Start the study countdown.
    Start,
    /// Pause the study countdown.
    Stop,
    /// Back to a full idle countdown.
    Reset,
    /// Take the offered break.
    AcceptBreak,
    /// Skip the offered break.
    DeclineBreak,
    /// End the running break early.
    EndBreak,
    /// Lengthen the exercise interval.
    ExerciseLonger,
    /// Shorten the exercise interval.
    ExerciseShorter,
    /// Lengthen the study block.
    StudyLonger,
    /// Shorten the study block.
    StudyShorter,
    /// Select the next todo.
    SelectNext,
    /// Select the previous todo.
    SelectPrevious,
    /// Flip the selected todo between open and done.
    ToggleTodo,
    /// Show or hide the key help.
    Help,
}

/// Map a key press to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,

        KeyCode::Char('s') => Action::Start,
        KeyCode::Char('p') => Action::Stop,
        KeyCode::Char('r') => Action::Reset,
        KeyCode::Char('y') => Action::AcceptBreak,
        KeyCode::Char('n') => Action::DeclineBreak,
        KeyCode::Char('e') => Action::EndBreak,

        KeyCode::Char('+' | '=') => Action::ExerciseLonger,
        KeyCode::Char('-') => Action::ExerciseShorter,
        KeyCode::Char(']') => Action::StudyLonger,
        KeyCode::Char('[') => Action::StudyShorter,

        // Navigation - vim style
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrevious,
        KeyCode::Char('x') | KeyCode::Enter => Action::ToggleTodo,

        KeyCode::Char('?') => Action::Help,

        _ => return None,
    };
    Some(action)
}

/// Wait up to `timeout` for a key press.
///
/// Returns the mapped action, or None on timeout or an unbound key.
///
/// # Errors
///
/// Returns `StudyError::Terminal` if event polling fails.
pub fn poll_action(timeout: Duration) -> Result<Option<Action>, StudyError> {
    if !event::poll(timeout).map_err(|e| StudyError::Terminal(format!("Event poll failed: {e}")))? {
        return Ok(None);
    }

    match event::read().map_err(|e| StudyError::Terminal(format!("Event read failed: {e}")))? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_cycle_keys() {
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(map_key(press(KeyCode::Char('p'))), Some(Action::Stop));
        assert_eq!(map_key(press(KeyCode::Char('y'))), Some(Action::AcceptBreak));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(Action::DeclineBreak));
        assert_eq!(map_key(press(KeyCode::Char('e'))), Some(Action::EndBreak));
        assert_eq!(map_key(press(KeyCode::Char(']'))), Some(Action::StudyLonger));
        assert_eq!(map_key(press(KeyCode::Char('-'))), Some(Action::ExerciseShorter));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(press(KeyCode::Char('q'))), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_unbound_and_release() {
        assert_eq!(map_key(press(KeyCode::Char('z'))), None);

        let mut release = press(KeyCode::Char('s'));
        release.kind = KeyEventKind::Release;
        assert_eq!(map_key(release), None);
    }
}
