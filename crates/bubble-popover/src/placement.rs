#![forbid(unsafe_code)]

//! Popover placement resolution.
//!
//! [`resolve`] decides where a panel should appear relative to its trigger so
//! it stays within the viewport. It is a pure, single-pass function of the
//! current geometry: no re-measurement, no iteration, no constraint solving.
//! The output is a pair of classification tags; turning those into visual
//! offsets is entirely the host styling layer's job.
//!
//! Known limitation: when neither side has room on the vertical axis the
//! panel stays below the trigger. There is no further fallback.

use bubble_core::geometry::{Rect, Size};

/// Vertical placement tag for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum VerticalPlacement {
    /// Below the trigger (the default).
    #[default]
    Below,
    /// Flipped above the trigger.
    Above,
}

/// Horizontal placement tag for a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub enum HorizontalPlacement {
    /// Centered on the trigger's horizontal midpoint (the default).
    #[default]
    Centered,
    /// Panel's left edge anchors at the trigger's left edge.
    AlignLeft,
    /// Panel's right edge anchors at the trigger's right edge.
    AlignRight,
}

/// The placement tags applied to a panel before it becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Placement {
    /// Vertical axis tag.
    pub vertical: VerticalPlacement,
    /// Horizontal axis tag.
    pub horizontal: HorizontalPlacement,
}

/// Clearance constants for placement decisions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "state-persistence",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct PlacementConfig {
    /// Vertical clearance required beyond the panel height before the
    /// below-placement is considered insufficient.
    pub flip_margin: f32,
    /// Horizontal clearance kept between the panel and the viewport edges.
    pub edge_margin: f32,
}

impl PlacementConfig {
    /// Set the vertical flip margin.
    #[must_use]
    pub const fn flip_margin(mut self, margin: f32) -> Self {
        self.flip_margin = margin;
        self
    }

    /// Set the horizontal edge margin.
    #[must_use]
    pub const fn edge_margin(mut self, margin: f32) -> Self {
        self.edge_margin = margin;
        self
    }
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            flip_margin: 15.0,
            edge_margin: 10.0,
        }
    }
}

/// Resolve placement tags for a panel about to open.
///
/// `trigger` is the trigger's viewport-relative bounds, `panel` the panel's
/// measured size after the reset-before-measure step, `viewport` the current
/// viewport size, and `scroll_top` the vertical page scroll offset.
///
/// Vertical axis: default below. Flip above only when the space below the
/// trigger cannot fit the panel plus [`PlacementConfig::flip_margin`] *and*
/// the space above can.
///
/// Horizontal axis: default centered on the trigger midpoint. Shift to
/// left-aligned when the centered panel would cross the left edge margin,
/// else right-aligned when it would cross the right one. The checks are
/// evaluated in that order, so left-alignment wins when the viewport is too
/// narrow for both.
#[must_use]
pub fn resolve(
    trigger: Rect,
    panel: Size,
    viewport: Size,
    scroll_top: f32,
    config: &PlacementConfig,
) -> Placement {
    let space_below = viewport.height - (trigger.bottom() - scroll_top);
    let space_above = trigger.top() - scroll_top;

    let vertical = if space_below < panel.height + config.flip_margin
        && space_above > panel.height + config.flip_margin
    {
        VerticalPlacement::Above
    } else {
        VerticalPlacement::Below
    };

    let center = trigger.center_x();
    let half_width = panel.width / 2.0;

    let horizontal = if center - half_width < config.edge_margin {
        HorizontalPlacement::AlignLeft
    } else if center + half_width > viewport.width - config.edge_margin {
        HorizontalPlacement::AlignRight
    } else {
        HorizontalPlacement::Centered
    };

    Placement {
        vertical,
        horizontal,
    }
}
