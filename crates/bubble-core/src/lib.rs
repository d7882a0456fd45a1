#![forbid(unsafe_code)]

//! Core primitives for bubbleui.
//!
//! This crate defines the geometry and input-event vocabulary shared by the
//! popover controller and its hosts. It deliberately knows nothing about any
//! concrete rendering surface: hosts translate their native events and
//! element geometry into these types.

pub mod event;
pub mod geometry;

pub use event::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerButton, PointerEvent};
pub use geometry::{Rect, Size};
