#![forbid(unsafe_code)]

//! Speech-bubble popover placement and exclusivity for bubbleui.
//!
//! Given a set of trigger elements that each own a popup panel,
//! [`SmartBubble`] decides, per activation, where the panel should appear
//! relative to its trigger so it stays within the viewport, and enforces
//! that at most one panel is open at a time.
//!
//! The controller does not touch any rendering environment directly: hosts
//! inject a [`Surface`] (geometry queries plus presentation-state sink) and
//! route normalized input events through [`SmartBubble::handle_event`]. The
//! controller emits placement *classifications* ([`Placement`]); mapping
//! those onto pixel offsets is the host styling layer's job.
//!
//! # Example
//!
//! ```
//! use bubble_core::event::{Event, PointerEvent};
//! use bubble_core::geometry::{Rect, Size};
//! use bubble_popover::{BubbleConfig, Hit, SmartBubble};
//! # #[cfg(feature = "test-helpers")] {
//! use bubble_popover::surface::FakeSurface;
//!
//! let mut surface = FakeSurface::new(Size::new(1280.0, 800.0));
//! let id = surface.push_trigger(Rect::new(100.0, 40.0, 80.0, 30.0), Size::new(200.0, 150.0));
//!
//! let mut bubbles = SmartBubble::bind(surface, [id], BubbleConfig::default())?;
//! bubbles.handle_event(&Event::Pointer(PointerEvent::new(120.0, 55.0)), Hit::Trigger(id));
//! assert_eq!(bubbles.active_trigger(), Some(id));
//! # }
//! # Ok::<(), bubble_popover::BindError>(())
//! ```

pub mod controller;
pub mod placement;
pub mod surface;

pub use controller::{BindError, BubbleConfig, Dispatch, SmartBubble};
pub use placement::{HorizontalPlacement, Placement, PlacementConfig, VerticalPlacement};
pub use surface::{Hit, Surface, TriggerId};
