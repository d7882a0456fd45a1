#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! Hosts translate their native input (DOM events, test scripts, replay
//! traces) into these types before routing them to the controller. All
//! events derive `Clone` and `PartialEq` for use in tests and pattern
//! matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are viewport-relative CSS pixels.
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish.
//! - `Modifiers` use bitflags for easy combination.
//! - Pointer clicks and keyboard Enter/Space are normalized to a single
//!   logical "activation" via [`Event::is_activation`], so both input
//!   modalities produce identical controller behavior.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer click (mouse click or synthesized tap).
    Pointer(PointerEvent),

    /// A touch contact starting. Dispatched separately from `Pointer`
    /// because hosts deliver it before any synthesized click and the
    /// controller must dismiss on it without suppressing default handling.
    TouchStart(PointerEvent),

    /// A keyboard event.
    Key(KeyEvent),

    /// Viewport was resized.
    Resize {
        /// New viewport width in pixels.
        width: f32,
        /// New viewport height in pixels.
        height: f32,
    },
}

impl Event {
    /// Whether this event is a logical activation: a primary-button pointer
    /// click, or an unmodified press of Enter or Space.
    #[must_use]
    pub fn is_activation(&self) -> bool {
        match self {
            Self::Pointer(p) => p.button == PointerButton::Primary,
            Self::Key(k) => {
                k.kind == KeyEventKind::Press
                    && k.modifiers.is_empty()
                    && matches!(k.code, KeyCode::Enter | KeyCode::Char(' '))
            }
            _ => false,
        }
    }

    /// Whether this event is a pointer or touch interaction (the kinds the
    /// document-level dismissal handler listens for).
    #[must_use]
    pub const fn is_pointer_interaction(&self) -> bool {
        matches!(self, Self::Pointer(_) | Self::TouchStart(_))
    }
}

/// A pointer (mouse/touch) event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// X coordinate in viewport-relative pixels.
    pub x: f32,

    /// Y coordinate in viewport-relative pixels.
    pub y: f32,

    /// Which button produced the event.
    pub button: PointerButton,
}

impl PointerEvent {
    /// Create a primary-button pointer event at the given position.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
        }
    }

    /// Set the button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Pointer buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button / touch contact.
    Primary,
    /// Right mouse button.
    Secondary,
    /// Middle mouse button.
    Auxiliary,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Check if this is a specific character key.
    #[must_use]
    pub fn is_char(&self, c: char) -> bool {
        matches!(self.code, KeyCode::Char(ch) if ch == c)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Up arrow.
    Up,

    /// Down arrow.
    Down,

    /// Left arrow.
    Left,

    /// Right arrow.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed.
    #[default]
    Press,
    /// Key is being held (auto-repeat).
    Repeat,
    /// Key was released.
    Release,
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
    fn primary_click_is_activation() {
        assert!(Event::Pointer(PointerEvent::new(5.0, 5.0)).is_activation());
    }

    #[test]
    fn secondary_click_is_not_activation() {
        let e = Event::Pointer(PointerEvent::new(5.0, 5.0).with_button(PointerButton::Secondary));
        assert!(!e.is_activation());
    }

    #[test]
    fn enter_and_space_are_activations() {
        assert!(Event::Key(KeyEvent::new(KeyCode::Enter)).is_activation());
        assert!(Event::Key(KeyEvent::new(KeyCode::Char(' '))).is_activation());
    }

    #[test]
    fn other_keys_are_not_activations() {
        assert!(!Event::Key(KeyEvent::new(KeyCode::Escape)).is_activation());
        assert!(!Event::Key(KeyEvent::new(KeyCode::Char('a'))).is_activation());
        assert!(!Event::Key(KeyEvent::new(KeyCode::Tab)).is_activation());
    }

    #[test]
    fn modified_or_released_keys_are_not_activations() {
        let ctrl_enter = KeyEvent::new(KeyCode::Enter).with_modifiers(Modifiers::CTRL);
        assert!(!Event::Key(ctrl_enter).is_activation());

        let release = KeyEvent::new(KeyCode::Enter).with_kind(KeyEventKind::Release);
        assert!(!Event::Key(release).is_activation());
    }

    #[test]
    fn touch_start_is_pointer_interaction_but_not_activation() {
        let e = Event::TouchStart(PointerEvent::new(1.0, 1.0));
        assert!(e.is_pointer_interaction());
        assert!(!e.is_activation());
    }

    #[test]
    fn resize_is_neither() {
        let e = Event::Resize {
            width: 800.0,
            height: 600.0,
        };
        assert!(!e.is_activation());
        assert!(!e.is_pointer_interaction());
    }

    #[test]
    fn key_event_helpers() {
        let e = KeyEvent::new(KeyCode::Char(' '));
        assert!(e.is_char(' '));
        assert!(!e.is_char('x'));
        assert_eq!(e.modifiers, Modifiers::NONE);
        assert_eq!(e.kind, KeyEventKind::Press);
    }
}
