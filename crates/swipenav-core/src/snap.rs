//! End-of-drag snap decision.
//!
//! Along the drag axis the displacement is split into three zones on each
//! side of the center:
//!
//! ```text
//!      x0       x1
//! 0----+--------+----> extent
//!  ctr |  inertia | surface
//! ```
//!
//! Below `x0` the drag snaps back to center, beyond `x1` it snaps to the
//! surface, and in between the direction of the last nonzero movement
//! decides. The negative side mirrors this.

use kurbo::{Size, Vec2};

use crate::config::NavigatorConfig;
use crate::geometry::{Axis, Position};

/// Threshold fractions for both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapThresholds {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for SnapThresholds {
    fn default() -> Self {
        Self::from(&NavigatorConfig::default())
    }
}

impl From<&NavigatorConfig> for SnapThresholds {
    fn from(config: &NavigatorConfig) -> Self {
        Self {
            horizontal: config.horizontal_snap_fraction,
            vertical: config.vertical_snap_fraction,
        }
    }
}

impl SnapThresholds {
    /// Fraction that applies to an axis.
    pub fn fraction(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
            Axis::Undefined => 0.0,
        }
    }
}

/// Decide where a drag along `axis` settles.
///
/// `current` is the live displacement, `inertia` the last nonzero per-axis
/// movement. Returns `None` when the axis is undefined or the displacement
/// along it is exactly zero; in both cases nothing should be committed.
pub fn snap_decision(
    axis: Axis,
    current: Vec2,
    inertia: Vec2,
    size: Size,
    thresholds: &SnapThresholds,
) -> Option<Position> {
    let (positive, negative) = axis.targets()?;
    snap_along(
        axis.component(current),
        axis.component(inertia),
        axis.extent(size),
        thresholds.fraction(axis),
        positive,
        negative,
    )
}

/// Single-axis snap rule.
///
/// Negating both the value and the inertia maps the negative side onto the
/// positive one exactly, so one comparison chain covers both.
pub fn snap_along(
    value: f64,
    inertia: f64,
    extent: f64,
    fraction: f64,
    positive: Position,
    negative: Position,
) -> Option<Position> {
    let (value, inertia, target) = if value > 0.0 {
        (value, inertia, positive)
    } else if value < 0.0 {
        (-value, -inertia, negative)
    } else {
        return None;
    };

    let near = fraction * extent;
    let far = (1.0 - fraction) * extent;

    let position = if value < near {
        Position::Center
    } else if value > far {
        target
    } else if inertia > 0.0 {
        target
    } else {
        Position::Center
    };
    Some(position)
}
