#![forbid(unsafe_code)]

//! Canonical input events forwarded by the host to a running tour.
//!
//! The host owns raw listener wiring (DOM listeners, terminal input). It
//! translates what it receives into these events and hands them to the
//! controller. All events derive `Clone` and `PartialEq` for use in tests.
//!
//! # Design Notes
//!
//! - Key events carry the [`FocusContext`] of the element that had focus, so
//!   navigation keys can be ignored while the user is typing.
//! - Clicks on the panel's own controls arrive as [`PanelAction`]s; the
//!   surface decides which markup maps to which action.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A keyboard event.
    Key(KeyEvent),

    /// The surface was resized.
    Resize {
        /// New surface width.
        width: f64,
        /// New surface height.
        height: f64,
    },

    /// The surface (or any scroll container, in capture mode) scrolled.
    Scroll,

    /// A control inside the info panel was activated.
    Panel(PanelAction),

    /// The dimmed overlay outside the highlight was clicked.
    OverlayClick,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// What kind of element had focus when the key was pressed.
    pub focus: FocusContext,
}

impl KeyEvent {
    /// Create a new key event with no modifiers and non-editable focus.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            focus: FocusContext::Other,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the focus context.
    #[must_use]
    pub const fn with_focus(mut self, focus: FocusContext) -> Self {
        self.focus = focus;
        self
    }

    /// Whether the key was pressed inside an editable field.
    #[must_use]
    pub const fn in_editable(&self) -> bool {
        matches!(self.focus, FocusContext::Editable)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Key codes the tour understands. Everything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),
    /// Enter/Return key.
    Enter,
    /// Escape key.
    Escape,
    /// Left arrow key.
    Left,
    /// Right arrow key.
    Right,
    /// Up arrow key.
    Up,
    /// Down arrow key.
    Down,
    /// Tab key.
    Tab,
    /// Any key without a dedicated variant.
    Other,
}

/// What kind of element held keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// An input, textarea, select, or content-editable element.
    Editable,
    /// Anything else (document body, buttons, links).
    #[default]
    Other,
}

/// Activation of one of the panel's controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    /// "Next" button.
    Next,
    /// "Back" button.
    Prev,
    /// Close ("×") button.
    Close,
    /// Confirm button on the last step or on a welcome step.
    Done,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_event_defaults() {
        let key = KeyEvent::new(KeyCode::Enter);
        assert_eq!(key.modifiers, Modifiers::NONE);
        assert_eq!(key.focus, FocusContext::Other);
        assert!(!key.in_editable());
    }

    #[test]
    fn key_event_builders() {
        let key = KeyEvent::from(KeyCode::Left)
            .with_modifiers(Modifiers::SHIFT | Modifiers::CTRL)
            .with_focus(FocusContext::Editable);
        assert!(key.modifiers.contains(Modifiers::SHIFT));
        assert!(key.modifiers.contains(Modifiers::CTRL));
        assert!(key.in_editable());
    }

    #[test]
    fn modifiers_default_is_none() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
        assert!(Modifiers::default().is_empty());
    }
}
