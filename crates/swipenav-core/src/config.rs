//! Tunables for snapping, animation and pointer recognition.

use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, NavigatorResult};

/// Default fraction of the container extent that counts as "near" a surface.
pub const DEFAULT_SNAP_FRACTION: f64 = 0.15;
/// Default duration of an animated commit, in seconds.
pub const DEFAULT_ANIMATION_DURATION: f64 = 0.2;

/// Navigator configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Snap threshold fraction for the horizontal axis (left/right).
    pub horizontal_snap_fraction: f64,
    /// Snap threshold fraction for the vertical axis (top/bottom).
    pub vertical_snap_fraction: f64,
    /// Duration handed to the animator for every commit.
    pub animation_duration: f64,
    /// Distance the pointer has to travel before a pan begins.
    pub pan_slop: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            horizontal_snap_fraction: DEFAULT_SNAP_FRACTION,
            vertical_snap_fraction: DEFAULT_SNAP_FRACTION,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            pan_slop: 0.0,
        }
    }
}

impl NavigatorConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both snap fractions at once.
    pub fn with_snap_fraction(mut self, fraction: f64) -> Self {
        self.horizontal_snap_fraction = fraction;
        self.vertical_snap_fraction = fraction;
        self
    }

    /// Set the animation duration.
    pub fn with_animation_duration(mut self, duration: f64) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Set the pointer slop.
    pub fn with_pan_slop(mut self, slop: f64) -> Self {
        self.pan_slop = slop;
        self
    }

    /// Check that every value is usable.
    ///
    /// Snap fractions above one half would make the near-center zone overlap
    /// the near-surface zone.
    pub fn validate(&self) -> NavigatorResult<()> {
        for (name, fraction) in [
            ("horizontal_snap_fraction", self.horizontal_snap_fraction),
            ("vertical_snap_fraction", self.vertical_snap_fraction),
        ] {
            if !(0.0..=0.5).contains(&fraction) {
                return Err(NavigatorError::InvalidConfig(format!(
                    "{} must be within [0, 0.5], got {}",
                    name, fraction
                )));
            }
        }
        if !self.animation_duration.is_finite() || self.animation_duration < 0.0 {
            return Err(NavigatorError::InvalidConfig(format!(
                "animation_duration must be a non-negative number, got {}",
                self.animation_duration
            )));
        }
        if !self.pan_slop.is_finite() || self.pan_slop < 0.0 {
            return Err(NavigatorError::InvalidConfig(format!(
                "pan_slop must be a non-negative number, got {}",
                self.pan_slop
            )));
        }
        Ok(())
    }
}
