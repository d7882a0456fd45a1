#![forbid(unsafe_code)]

//! Host surface abstraction.
//!
//! The original design read geometry from, and wrote presentation state back
//! to, an ambient document. Here that ambient dependency is an explicit
//! [`Surface`] the host injects at bind time: geometry queries on one side,
//! presentation-state projection on the other. The controller never creates
//! or destroys elements; it only toggles active/expanded/placement state
//! through this trait. Tests inject [`FakeSurface`] instead of a live
//! rendering environment.

#[cfg(any(test, feature = "test-helpers"))]
use std::cell::RefCell;

use bubble_core::geometry::{Rect, Size};

use crate::placement::Placement;

/// Stable identity of a trigger element, assigned by the host.
///
/// Identity is captured once at bind time; triggers added to the surface
/// later are not tracked (a known limitation carried over from the original
/// behavior).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct TriggerId(pub usize);

/// Where an input event landed, resolved by the host's hit testing.
///
/// The host is responsible for structural containment: an event inside an
/// open panel resolves to `Panel`, an event on the trigger or any of its
/// non-panel descendants resolves to `Trigger`, everything else is
/// `Outside`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hit {
    /// On a trigger (or a non-panel descendant of it).
    Trigger(TriggerId),
    /// Inside the panel owned by the given trigger.
    Panel(TriggerId),
    /// Outside every trigger.
    Outside,
}

/// Geometry queries and presentation sink the controller operates against.
///
/// Query methods reflect the surface's *current* state; the controller
/// re-reads them on every open so placement is never computed from stale
/// geometry. Sink methods project controller state onto the surface
/// (classes, ARIA attributes) and must not feed back into controller state.
pub trait Surface {
    /// Current viewport size.
    fn viewport(&self) -> Size;

    /// Vertical page scroll offset in pixels.
    fn scroll_top(&self) -> f32;

    /// Viewport-relative bounds of a trigger, or `None` if it is gone from
    /// the surface.
    fn trigger_rect(&self, id: TriggerId) -> Option<Rect>;

    /// Measured size of the trigger's panel, or `None` if the trigger has no
    /// panel. Called after [`Surface::flush_layout`], so the measurement must
    /// reflect cleared placement state.
    fn panel_size(&self, id: TriggerId) -> Option<Size>;

    /// Project the ARIA expanded state onto the trigger.
    fn set_expanded(&mut self, id: TriggerId, expanded: bool);

    /// Project the active classification onto the trigger.
    fn set_active(&mut self, id: TriggerId, active: bool);

    /// Apply placement tags to the trigger's panel.
    fn apply_placement(&mut self, id: TriggerId, placement: Placement);

    /// Remove placement tags and any inline positional overrides left from a
    /// prior open.
    fn clear_placement(&mut self, id: TriggerId);

    /// Force a synchronous layout flush so that the next geometry read
    /// reflects the cleared placement state rather than cached geometry.
    fn flush_layout(&mut self, id: TriggerId);
}

/// One call into a [`FakeSurface`], recorded in order.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceCall {
    /// `set_expanded`.
    SetExpanded(TriggerId, bool),
    /// `set_active`.
    SetActive(TriggerId, bool),
    /// `apply_placement`.
    ApplyPlacement(TriggerId, Placement),
    /// `clear_placement`.
    ClearPlacement(TriggerId),
    /// `flush_layout`.
    FlushLayout(TriggerId),
    /// `panel_size` read (logged to verify reset-before-measure ordering).
    MeasurePanel(TriggerId),
    /// `trigger_rect` read.
    MeasureTrigger(TriggerId),
}

/// A scripted trigger on a [`FakeSurface`].
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FakeTrigger {
    /// Viewport-relative bounds.
    pub rect: Rect,
    /// Panel size, or `None` for a panel-less trigger.
    pub panel: Option<Size>,
    /// Projected ARIA expanded state.
    pub expanded: bool,
    /// Projected active classification.
    pub active: bool,
    /// Projected placement tags.
    pub placement: Option<Placement>,
}

/// In-memory [`Surface`] for tests and host prototyping.
///
/// Geometry is scriptable (move triggers, resize the viewport, scroll the
/// page between events) and every call, including the read-only geometry
/// measurements, is logged so tests can assert ordering contracts such as
/// reset-before-measure.
#[cfg(any(test, feature = "test-helpers"))]
#[derive(Debug, Clone, Default)]
pub struct FakeSurface {
    /// Current viewport size.
    pub viewport: Size,
    /// Current vertical scroll offset.
    pub scroll_top: f32,
    triggers: Vec<FakeTrigger>,
    // RefCell so that &self geometry queries can be logged too.
    calls: RefCell<Vec<SurfaceCall>>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl FakeSurface {
    /// Create a fake surface with the given viewport.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    /// Add a trigger with a panel. Returns its id.
    pub fn push_trigger(&mut self, rect: Rect, panel: Size) -> TriggerId {
        self.push(rect, Some(panel))
    }

    /// Add a trigger without a panel. Returns its id.
    pub fn push_panelless_trigger(&mut self, rect: Rect) -> TriggerId {
        self.push(rect, None)
    }

    fn push(&mut self, rect: Rect, panel: Option<Size>) -> TriggerId {
        let id = TriggerId(self.triggers.len());
        self.triggers.push(FakeTrigger {
            rect,
            panel,
            expanded: false,
            active: false,
            placement: None,
        });
        id
    }

    /// Ids of all triggers currently on the surface.
    #[must_use]
    pub fn trigger_ids(&self) -> Vec<TriggerId> {
        (0..self.triggers.len()).map(TriggerId).collect()
    }

    /// Move a trigger to new bounds.
    pub fn move_trigger(&mut self, id: TriggerId, rect: Rect) {
        if let Some(t) = self.triggers.get_mut(id.0) {
            t.rect = rect;
        }
    }

    /// Inspect a trigger's projected state.
    #[must_use]
    pub fn trigger(&self, id: TriggerId) -> Option<&FakeTrigger> {
        self.triggers.get(id.0)
    }

    /// Number of triggers whose projected state is active.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.triggers.iter().filter(|t| t.active).count()
    }

    /// Snapshot of the ordered call log.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.borrow().clone()
    }

    /// Drop all recorded calls.
    pub fn clear_calls(&mut self) {
        self.calls.get_mut().clear();
    }

    fn log(&self, call: SurfaceCall) {
        self.calls.borrow_mut().push(call);
    }
}

#[cfg(any(test, feature = "test-helpers"))]
impl Surface for FakeSurface {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn scroll_top(&self) -> f32 {
        self.scroll_top
    }

    fn trigger_rect(&self, id: TriggerId) -> Option<Rect> {
        self.log(SurfaceCall::MeasureTrigger(id));
        self.triggers.get(id.0).map(|t| t.rect)
    }

    fn panel_size(&self, id: TriggerId) -> Option<Size> {
        self.log(SurfaceCall::MeasurePanel(id));
        self.triggers.get(id.0).and_then(|t| t.panel)
    }

    fn set_expanded(&mut self, id: TriggerId, expanded: bool) {
        self.log(SurfaceCall::SetExpanded(id, expanded));
        if let Some(t) = self.triggers.get_mut(id.0) {
            t.expanded = expanded;
        }
    }

    fn set_active(&mut self, id: TriggerId, active: bool) {
        self.log(SurfaceCall::SetActive(id, active));
        if let Some(t) = self.triggers.get_mut(id.0) {
            t.active = active;
        }
    }

    fn apply_placement(&mut self, id: TriggerId, placement: Placement) {
        self.log(SurfaceCall::ApplyPlacement(id, placement));
        if let Some(t) = self.triggers.get_mut(id.0) {
            t.placement = Some(placement);
        }
    }

    fn clear_placement(&mut self, id: TriggerId) {
        self.log(SurfaceCall::ClearPlacement(id));
        if let Some(t) = self.triggers.get_mut(id.0) {
            t.placement = None;
        }
    }

    fn flush_layout(&mut self, id: TriggerId) {
        self.log(SurfaceCall::FlushLayout(id));
    }
}
