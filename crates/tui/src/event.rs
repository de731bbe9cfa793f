//! Event handling for the TUI.
//!
//! Provides keyboard event polling and key predicates.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;

use crate::TuiResult;

/// Poll for keyboard events with a timeout.
///
/// Returns `Some(KeyEvent)` if a key was pressed within the timeout,
/// or `None` if no key was pressed.
pub fn poll_key(timeout: Duration) -> TuiResult<Option<KeyEvent>> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(Some(key));
    }
    Ok(None)
}

/// Check if the key event represents a quit command.
///
/// Returns `true` for 'q' key or Ctrl+C.
pub fn is_quit(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            ..
        }
    )
}

/// Check if the key event is the Tab key.
pub fn is_tab(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Tab,
            ..
        }
    )
}

/// Check if the key event is the down navigation key (j or Down arrow).
pub fn is_down(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('j'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Down,
            ..
        }
    )
}

/// Check if the key event is the up navigation key (k or Up arrow).
pub fn is_up(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('k'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Up,
            ..
        }
    )
}

/// Check if the key event scrolls left (h or Left arrow).
pub fn is_left(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('h'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Left,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Check if the key event scrolls right (l or Right arrow).
pub fn is_right(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('l'),
            modifiers: KeyModifiers::NONE,
            ..
        } | KeyEvent {
            code: KeyCode::Right,
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

/// Check if the key event pages left (H or PageUp).
///
/// Terminals disagree on whether an uppercase letter carries SHIFT, so
/// modifiers are ignored.
pub fn is_page_left(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('H') | KeyCode::PageUp,
            ..
        }
    )
}

/// Check if the key event pages right (L or PageDown).
pub fn is_page_right(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('L') | KeyCode::PageDown,
            ..
        }
    )
}

/// Check if the key event jumps to today (t).
pub fn is_today(key: &KeyEvent) -> bool {
    matches!(
        key,
        KeyEvent {
            code: KeyCode::Char('t'),
            modifiers: KeyModifiers::NONE,
            ..
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn make_key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: event::KeyEventState::NONE,
        }
    }

    #[test]
    fn test_is_quit_q() {
        assert!(is_quit(&make_key(KeyCode::Char('q'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_quit_ctrl_c() {
        assert!(is_quit(&make_key(KeyCode::Char('c'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_is_quit_other() {
        assert!(!is_quit(&make_key(KeyCode::Char('x'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_tab() {
        assert!(is_tab(&make_key(KeyCode::Tab, KeyModifiers::NONE)));
    }

    #[test]
    fn test_vertical_keys() {
        assert!(is_down(&make_key(KeyCode::Char('j'), KeyModifiers::NONE)));
        assert!(is_down(&make_key(KeyCode::Down, KeyModifiers::NONE)));
        assert!(is_up(&make_key(KeyCode::Char('k'), KeyModifiers::NONE)));
        assert!(is_up(&make_key(KeyCode::Up, KeyModifiers::NONE)));
    }

    #[test]
    fn test_horizontal_keys() {
        assert!(is_left(&make_key(KeyCode::Char('h'), KeyModifiers::NONE)));
        assert!(is_left(&make_key(KeyCode::Left, KeyModifiers::NONE)));
        assert!(is_right(&make_key(KeyCode::Char('l'), KeyModifiers::NONE)));
        assert!(is_right(&make_key(KeyCode::Right, KeyModifiers::NONE)));
    }

    #[test]
    fn test_h_with_modifier_is_not_scroll() {
        assert!(!is_left(&make_key(KeyCode::Char('h'), KeyModifiers::CONTROL)));
        assert!(!is_right(&make_key(KeyCode::Char('l'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn test_page_keys_accept_shift() {
        assert!(is_page_left(&make_key(KeyCode::Char('H'), KeyModifiers::SHIFT)));
        assert!(is_page_left(&make_key(KeyCode::Char('H'), KeyModifiers::NONE)));
        assert!(is_page_right(&make_key(KeyCode::Char('L'), KeyModifiers::SHIFT)));
        assert!(is_page_right(&make_key(KeyCode::PageDown, KeyModifiers::NONE)));
        assert!(!is_page_left(&make_key(KeyCode::Char('h'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(&make_key(KeyCode::Char('t'), KeyModifiers::NONE)));
        assert!(!is_today(&make_key(KeyCode::Char('T'), KeyModifiers::SHIFT)));
    }
}
