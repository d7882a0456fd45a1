#![forbid(unsafe_code)]

//! The speech-bubble popover controller.
//!
//! [`SmartBubble`] owns the full set of trigger/panel pairs on a surface,
//! routes activation and dismissal input, computes panel placement per
//! activation, and enforces that at most one panel is open at any time.
//!
//! Active and placement state live in the controller's own per-trigger
//! records; the surface's classes and ARIA attributes are synced as a
//! projection of those records, never read back. All operations run to
//! completion synchronously within one event dispatch.
//!
//! # Event routing
//!
//! The host translates its native input into [`Event`]s, resolves each
//! event's target to a [`Hit`], and passes both to
//! [`SmartBubble::handle_event`]. A [`Dispatch::Consumed`] result means the
//! host must suppress its default action and stop further propagation for
//! that event; [`Dispatch::Ignored`] means the host proceeds normally.
//! Because a consumed trigger/panel event never reaches the host's
//! outside-dismissal path, handler ordering is deterministic by
//! construction.

use std::fmt;
use std::time::Duration;

use bubble_core::event::Event;

use crate::placement::{self, Placement, PlacementConfig};
use crate::surface::{Hit, Surface, TriggerId};

/// Outcome of routing one event through the controller.
///
/// Mirrors preventDefault + stopPropagation: a `Consumed` event must not
/// trigger the host's default handling or continue bubbling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The controller handled the event; suppress default and propagation.
    Consumed,
    /// The event was not the controller's to consume.
    Ignored,
}

/// Controller construction failure.
///
/// Binding is the only fallible step. Hosts are expected to catch this at
/// the call site and log it, leaving the rest of the page functional with no
/// popovers interactive rather than crashing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BindError {
    /// The surface reported a zero-sized viewport, i.e. the page context is
    /// not ready to be measured.
    EmptyViewport {
        /// Reported viewport width.
        width: f32,
        /// Reported viewport height.
        height: f32,
    },
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyViewport { width, height } => write!(
                f,
                "cannot bind popover controller to an empty viewport ({width}x{height})"
            ),
        }
    }
}

impl std::error::Error for BindError {}

/// Controller configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BubbleConfig {
    /// Clearance constants for the placement algorithm.
    pub placement: PlacementConfig,
    /// How long a host without an explicit content-ready signal should wait
    /// after its page-ready event before calling [`SmartBubble::bind`], so
    /// dynamically injected trigger markup can settle. This is a heuristic,
    /// not a readiness guarantee; hosts that can signal content-ready
    /// explicitly should bind from that signal and ignore this value.
    pub settle_delay: Duration,
}

impl BubbleConfig {
    /// Set the placement clearance constants.
    #[must_use]
    pub const fn placement(mut self, placement: PlacementConfig) -> Self {
        self.placement = placement;
        self
    }

    /// Set the bind settle delay.
    #[must_use]
    pub const fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }
}

impl Default for BubbleConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            settle_delay: Duration::from_millis(100),
        }
    }
}

/// Per-trigger record owned by the controller.
///
/// This is the source of truth; the surface's presentation attributes are a
/// projection of it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TriggerState {
    id: TriggerId,
    active: bool,
    placement: Option<Placement>,
}

impl TriggerState {
    const fn new(id: TriggerId) -> Self {
        Self {
            id,
            active: false,
            placement: None,
        }
    }
}

/// Placement and exclusivity controller for speech-bubble popovers.
///
/// Holds the surface it was bound to for its whole lifetime. Taking the
/// surface by value makes double-binding (which would duplicate handlers in
/// the original design) unrepresentable: there is exactly one controller per
/// surface.
#[derive(Debug)]
pub struct SmartBubble<S: Surface> {
    surface: S,
    triggers: Vec<TriggerState>,
    config: BubbleConfig,
}

impl<S: Surface> SmartBubble<S> {
    /// Bind a controller to a surface, capturing the given trigger set.
    ///
    /// Triggers added to the surface afterwards are not tracked (known
    /// limitation carried over from the original behavior).
    ///
    /// # Errors
    ///
    /// [`BindError::EmptyViewport`] when the surface cannot be measured yet.
    pub fn bind(
        surface: S,
        triggers: impl IntoIterator<Item = TriggerId>,
        config: BubbleConfig,
    ) -> Result<Self, BindError> {
        let viewport = surface.viewport();
        if viewport.is_empty() {
            return Err(BindError::EmptyViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let triggers: Vec<TriggerState> = triggers.into_iter().map(TriggerState::new).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "bubble.bind",
            triggers = triggers.len(),
            viewport_width = viewport.width,
            viewport_height = viewport.height,
        );

        Ok(Self {
            surface,
            triggers,
            config,
        })
    }

    /// Route one input event through the controller.
    ///
    /// - An activation targeting a trigger toggles that trigger and is
    ///   consumed.
    /// - A pointer/touch interaction inside a panel is consumed without any
    ///   state change, so panel content never dismisses its own panel.
    /// - A pointer/touch interaction outside every trigger closes all panels
    ///   but is not consumed (the host's own handling proceeds).
    /// - Everything else is ignored.
    pub fn handle_event(&mut self, event: &Event, hit: Hit) -> Dispatch {
        if event.is_activation() {
            if let Hit::Trigger(id) = hit {
                self.activate(id);
                return Dispatch::Consumed;
            }
        }

        if event.is_pointer_interaction() {
            match hit {
                Hit::Panel(_) => return Dispatch::Consumed,
                Hit::Outside => {
                    self.close_all();
                    return Dispatch::Ignored;
                }
                Hit::Trigger(_) => {}
            }
        }

        Dispatch::Ignored
    }

    /// Toggle a trigger: dismiss everything, then open it unless it was the
    /// one already open.
    ///
    /// A trigger without a panel is a safe no-op, as is an id the controller
    /// does not track.
    pub fn activate(&mut self, id: TriggerId) {
        let Some(index) = self.index_of(id) else {
            return;
        };
        if self.surface.panel_size(id).is_none() {
            #[cfg(feature = "tracing")]
            tracing::debug!(message = "bubble.activate.no_panel", id = id.0);
            return;
        }

        let was_active = self.triggers[index].active;
        self.close_all();
        if !was_active {
            self.open(index);
        }

        debug_assert!(self.triggers.iter().filter(|t| t.active).count() <= 1);
    }

    /// Close every tracked trigger. Idempotent.
    pub fn close_all(&mut self) {
        for index in 0..self.triggers.len() {
            self.close_at(index);
        }
    }

    /// Close one trigger. Idempotent; unknown ids are ignored.
    pub fn close(&mut self, id: TriggerId) {
        if let Some(index) = self.index_of(id) {
            self.close_at(index);
        }
    }

    /// The currently open trigger, if any.
    #[must_use]
    pub fn active_trigger(&self) -> Option<TriggerId> {
        self.triggers.iter().find(|t| t.active).map(|t| t.id)
    }

    /// Whether the given trigger is open.
    #[must_use]
    pub fn is_active(&self, id: TriggerId) -> bool {
        self.index_of(id)
            .is_some_and(|index| self.triggers[index].active)
    }

    /// The placement last applied to the given trigger's panel, if it is
    /// open.
    #[must_use]
    pub fn placement(&self, id: TriggerId) -> Option<Placement> {
        self.index_of(id)
            .and_then(|index| self.triggers[index].placement)
    }

    /// Number of tracked triggers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    /// Whether the controller tracks no triggers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// The controller's configuration.
    #[must_use]
    pub const fn config(&self) -> &BubbleConfig {
        &self.config
    }

    /// Shared access to the bound surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the bound surface, for hosts that need to script or
    /// update it between events (e.g. viewport resizes).
    pub const fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Open the trigger at `index`: mark it active, reset stale placement,
    /// flush layout, re-measure, and apply freshly resolved tags.
    fn open(&mut self, index: usize) {
        let id = self.triggers[index].id;

        self.triggers[index].active = true;
        self.surface.set_active(id, true);
        self.surface.set_expanded(id, true);

        // Placement must not be sticky across re-opens at a different scroll
        // position or viewport size: clear first, flush, then measure.
        self.surface.clear_placement(id);
        self.surface.flush_layout(id);

        let (Some(trigger_rect), Some(panel)) =
            (self.surface.trigger_rect(id), self.surface.panel_size(id))
        else {
            // Geometry vanished between the panel check and the measurement;
            // leave the panel open with the host's default styling.
            return;
        };

        let resolved = placement::resolve(
            trigger_rect,
            panel,
            self.surface.viewport(),
            self.surface.scroll_top(),
            &self.config.placement,
        );
        self.triggers[index].placement = Some(resolved);
        self.surface.apply_placement(id, resolved);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "bubble.open",
            id = id.0,
            vertical = ?resolved.vertical,
            horizontal = ?resolved.horizontal,
        );
    }

    fn close_at(&mut self, index: usize) {
        if !self.triggers[index].active {
            return;
        }
        let id = self.triggers[index].id;
        self.triggers[index].active = false;
        self.triggers[index].placement = None;
        self.surface.set_active(id, false);
        self.surface.set_expanded(id, false);

        #[cfg(feature = "tracing")]
        tracing::debug!(message = "bubble.close", id = id.0);
    }

    fn index_of(&self, id: TriggerId) -> Option<usize> {
        self.triggers.iter().position(|t| t.id == id)
    }
}
