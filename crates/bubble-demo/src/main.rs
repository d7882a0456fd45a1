#![forbid(unsafe_code)]

//! bubbleui demo.
//!
//! Replays a scripted interaction sequence against an in-memory page
//! surface and logs every controller state transition.
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run -p bubble-demo
//! ```

use std::thread;

use bubble_core::event::{Event, KeyCode, KeyEvent, PointerEvent};
use bubble_core::geometry::{Rect, Size};
use bubble_popover::surface::FakeSurface;
use bubble_popover::{BubbleConfig, Hit, SmartBubble, TriggerId};
use tracing_subscriber::EnvFilter;

/// One scripted step: a label for the log, an event, and where it landed.
struct Step {
    label: &'static str,
    event: Event,
    hit: Hit,
}

fn script(ids: &[TriggerId]) -> Vec<Step> {
    vec![
        Step {
            label: "click the corner trigger",
            event: Event::Pointer(PointerEvent::new(10.0, 48.0)),
            hit: Hit::Trigger(ids[0]),
        },
        Step {
            label: "click inside its open panel",
            event: Event::Pointer(PointerEvent::new(60.0, 120.0)),
            hit: Hit::Panel(ids[0]),
        },
        Step {
            label: "keyboard-activate the bottom trigger",
            event: Event::Key(KeyEvent::new(KeyCode::Enter)),
            hit: Hit::Trigger(ids[2]),
        },
        Step {
            label: "activate the panel-less trigger",
            event: Event::Pointer(PointerEvent::new(420.0, 390.0)),
            hit: Hit::Trigger(ids[3]),
        },
        Step {
            label: "tap empty page space",
            event: Event::TouchStart(PointerEvent::new(300.0, 600.0)),
            hit: Hit::Outside,
        },
        Step {
            label: "space-activate the centered trigger",
            event: Event::Key(KeyEvent::new(KeyCode::Char(' '))),
            hit: Hit::Trigger(ids[1]),
        },
        Step {
            label: "toggle it closed again",
            event: Event::Pointer(PointerEvent::new(620.0, 390.0)),
            hit: Hit::Trigger(ids[1]),
        },
    ]
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let mut surface = FakeSurface::new(Size::new(1280.0, 800.0));
    let panel = Size::new(220.0, 140.0);
    let ids = vec![
        surface.push_trigger(Rect::new(2.0, 40.0, 16.0, 16.0), panel),
        surface.push_trigger(Rect::new(600.0, 380.0, 80.0, 30.0), panel),
        surface.push_trigger(Rect::new(600.0, 740.0, 80.0, 30.0), panel),
        surface.push_panelless_trigger(Rect::new(400.0, 380.0, 80.0, 30.0)),
    ];

    let config = BubbleConfig::default();
    // This host has no content-ready signal, so it waits the documented
    // settle delay after "page ready" before binding.
    thread::sleep(config.settle_delay);

    let mut bubbles = match SmartBubble::bind(surface, ids.clone(), config) {
        Ok(bubbles) => bubbles,
        Err(err) => {
            // Degrade gracefully: the page stays usable, popovers inert.
            tracing::error!(message = "bubble.bind.failed", error = %err);
            return;
        }
    };

    tracing::info!(message = "demo.start", triggers = bubbles.len());

    for step in script(&ids) {
        let dispatch = bubbles.handle_event(&step.event, step.hit);
        tracing::info!(
            message = "demo.step",
            label = step.label,
            dispatch = ?dispatch,
            active = ?bubbles.active_trigger(),
            placement = ?bubbles.active_trigger().and_then(|id| bubbles.placement(id)),
        );
    }

    // Resize the viewport and reopen the bottom trigger: placement is
    // recomputed from the new geometry, not reused.
    bubbles.surface_mut().viewport = Size::new(1280.0, 1400.0);
    bubbles.handle_event(&Event::Key(KeyEvent::new(KeyCode::Enter)), Hit::Trigger(ids[2]));
    tracing::info!(
        message = "demo.after_resize",
        placement = ?bubbles.placement(ids[2]),
    );
}
