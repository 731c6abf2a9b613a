#![forbid(unsafe_code)]

//! Keyboard navigation map.
//!
//! | Key | Command |
//! |-----|---------|
//! | Right, Enter | [`NavCommand::Next`] |
//! | Left | [`NavCommand::Prev`] |
//! | Escape | [`NavCommand::Exit`] (only when closing is allowed) |
//!
//! Keys pressed while an editable element has focus, or with Ctrl, Alt, or
//! Super held, are never mapped.

use waypoint_core::{KeyCode, KeyEvent, Modifiers};

/// Navigation command produced by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavCommand {
    Next,
    Prev,
    Exit,
}

/// Map a key event to a navigation command.
#[must_use]
pub fn command_for(key: &KeyEvent, allow_close: bool) -> Option<NavCommand> {
    if key.in_editable() || key.modifiers.intersects(Modifiers::CTRL | Modifiers::ALT | Modifiers::SUPER) {
        return None;
    }
    match key.code {
        KeyCode::Right | KeyCode::Enter => Some(NavCommand::Next),
        KeyCode::Left => Some(NavCommand::Prev),
        KeyCode::Escape if allow_close => Some(NavCommand::Exit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::FocusContext;

    #[test]
    fn arrows_and_enter_navigate() {
        assert_eq!(command_for(&KeyCode::Right.into(), true), Some(NavCommand::Next));
        assert_eq!(command_for(&KeyCode::Enter.into(), true), Some(NavCommand::Next));
        assert_eq!(command_for(&KeyCode::Left.into(), true), Some(NavCommand::Prev));
        assert_eq!(command_for(&KeyCode::Up.into(), true), None);
        assert_eq!(command_for(&KeyCode::Char('n').into(), true), None);
    }

    #[test]
    fn escape_respects_allow_close() {
        assert_eq!(command_for(&KeyCode::Escape.into(), true), Some(NavCommand::Exit));
        assert_eq!(command_for(&KeyCode::Escape.into(), false), None);
    }

    #[test]
    fn editable_focus_is_left_alone() {
        for code in [KeyCode::Right, KeyCode::Left, KeyCode::Enter, KeyCode::Escape] {
            let key = KeyEvent::new(code).with_focus(FocusContext::Editable);
            assert_eq!(command_for(&key, true), None, "{code:?}");
        }
    }

    #[test]
    fn shortcut_modifiers_are_left_alone() {
        let ctrl = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::CTRL);
        assert_eq!(command_for(&ctrl, true), None);
        let shift = KeyEvent::new(KeyCode::Right).with_modifiers(Modifiers::SHIFT);
        assert_eq!(command_for(&shift, true), Some(NavCommand::Next));
    }
}
