//! Keyboard input handling for the interactive TUI.
//!
//! This module maps crossterm KeyEvents to form edits and loop-level
//! actions. Edits (focus moves, value steps) are applied to the [`App`]
//! directly; submission and quit are returned as actions for the event
//! loop to carry out.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key was handled by mutating the app state
    Handled,
    /// Start a new generation request
    Submit,
    /// Leave the TUI
    Quit,
    /// Key is not bound to anything
    None,
}

/// Handle a key event against the current app state.
///
/// Bindings:
/// - Tab / Down / j: focus next field
/// - Shift+Tab / Up / k: focus previous field
/// - Right / l / Space: step the focused field forward
/// - Left / h: step the focused field backward
/// - Enter: submit the form (swallowed while a request is pending)
/// - q / Esc / Ctrl+C: quit
pub fn handle_key_event(event: KeyEvent, app: &mut App) -> KeyAction {
    let KeyEvent {
        code, modifiers, ..
    } = event;

    if modifiers.contains(KeyModifiers::CONTROL) {
        return match code {
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::None,
        };
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab | KeyCode::Down | KeyCode::Char('j') => {
            app.focus_next();
            KeyAction::Handled
        }
        KeyCode::BackTab | KeyCode::Up | KeyCode::Char('k') => {
            app.focus_previous();
            KeyAction::Handled
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            app.increment_focused();
            KeyAction::Handled
        }
        KeyCode::Left | KeyCode::Char('h') => {
            app.decrement_focused();
            KeyAction::Handled
        }
        KeyCode::Enter => {
            // Submit is disabled while a request is in flight
            if app.controller.is_pending() {
                KeyAction::Handled
            } else {
                KeyAction::Submit
            }
        }
        _ => KeyAction::None,
    }
}
