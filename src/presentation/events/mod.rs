//! Event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::domain::Tab;

/// Result of event handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventResult {
    /// Continue processing.
    Continue,
    /// Exit application.
    Exit,
    /// Event was consumed.
    Consumed,
}

/// Key classification shared by every screen.
pub struct EventHandler;

impl EventHandler {
    /// Checks if key is a quit event.
    ///
    /// Only meaningful when no text field has focus; see [`Self::is_force_quit`].
    #[must_use]
    pub fn is_quit_event(key: &KeyEvent) -> bool {
        Self::is_force_quit(key)
            || matches!(
                key,
                KeyEvent {
                    code: KeyCode::Char('q') | KeyCode::Esc,
                    modifiers: KeyModifiers::NONE,
                    ..
                }
            )
    }

    /// Ctrl-C quits from anywhere, text fields included.
    #[must_use]
    pub fn is_force_quit(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            }
        )
    }

    /// Checks if key is a submit event.
    #[must_use]
    pub fn is_submit_event(key: &KeyEvent) -> bool {
        matches!(
            key,
            KeyEvent {
                code: KeyCode::Enter,
                ..
            }
        )
    }

    /// Resolves tab switching keys.
    ///
    /// Digits only switch tabs when `allow_digits` is set, since they are
    /// valid input in text fields. F1-F5, `Tab` and `Shift-Tab` always switch.
    #[must_use]
    pub fn tab_switch(key: &KeyEvent, current: Tab, allow_digits: bool) -> Option<Tab> {
        match key.code {
            KeyCode::Char(c @ '1'..='9') if allow_digits && key.modifiers.is_empty() => {
                c.to_digit(10)
                    .and_then(|n| usize::try_from(n).ok())
                    .and_then(|n| Tab::from_index(n - 1))
            }
            KeyCode::F(n) => Tab::from_index(usize::from(n).checked_sub(1)?),
            KeyCode::Tab => Some(current.next()),
            KeyCode::BackTab => Some(current.previous()),
            _ => None,
        }
    }
}
