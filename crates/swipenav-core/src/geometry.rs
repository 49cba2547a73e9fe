//! Surface positions and the offset model.
//!
//! The whole container is driven by a single displacement of the center
//! surface. Every auxiliary surface is anchored edge-adjacent to the center,
//! so moving the center by one container width to the right brings the left
//! surface into view, and so on. Each surface therefore has one fixed target
//! displacement, and the surface in view is whichever target the current
//! displacement equals.

use kurbo::{Size, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{NavigatorError, NavigatorResult};

/// One of the five surface slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    #[default]
    Center,
    Top,
    Bottom,
    Left,
    Right,
}

impl Position {
    /// All positions, in slot order.
    pub const ALL: [Position; 5] = [
        Position::Center,
        Position::Top,
        Position::Bottom,
        Position::Left,
        Position::Right,
    ];

    /// The four auxiliary positions.
    pub const AUXILIARY: [Position; 4] = [
        Position::Top,
        Position::Bottom,
        Position::Left,
        Position::Right,
    ];

    /// Slot index used by fixed-size mappings keyed by position.
    pub const fn index(self) -> usize {
        match self {
            Position::Center => 0,
            Position::Top => 1,
            Position::Bottom => 2,
            Position::Left => 3,
            Position::Right => 4,
        }
    }

    /// The axis a drag has to travel along to reach this surface.
    /// `None` for the center.
    pub fn axis(self) -> Option<Axis> {
        match self {
            Position::Center => None,
            Position::Top | Position::Bottom => Some(Axis::Vertical),
            Position::Left | Position::Right => Some(Axis::Horizontal),
        }
    }
}

/// The single travel direction a drag is locked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Undefined,
    Horizontal,
    Vertical,
}

impl Axis {
    /// Component of `v` along this axis. Zero when undefined.
    pub fn component(self, v: Vec2) -> f64 {
        match self {
            Axis::Horizontal => v.x,
            Axis::Vertical => v.y,
            Axis::Undefined => 0.0,
        }
    }

    /// `v` with its component along this axis replaced by `value`.
    pub fn with_component(self, v: Vec2, value: f64) -> Vec2 {
        match self {
            Axis::Horizontal => Vec2::new(value, v.y),
            Axis::Vertical => Vec2::new(v.x, value),
            Axis::Undefined => v,
        }
    }

    /// Container extent along this axis.
    pub fn extent(self, size: Size) -> f64 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
            Axis::Undefined => 0.0,
        }
    }

    /// Surfaces reached by a positive and a negative displacement.
    ///
    /// A positive x displacement moves the center to the right and reveals
    /// the left surface; a positive y displacement reveals the top surface.
    pub fn targets(self) -> Option<(Position, Position)> {
        match self {
            Axis::Horizontal => Some((Position::Left, Position::Right)),
            Axis::Vertical => Some((Position::Top, Position::Bottom)),
            Axis::Undefined => None,
        }
    }
}

/// The five fixed target displacements, keyed by position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOffsets {
    offsets: [Vec2; 5],
}

impl SurfaceOffsets {
    /// Derive all targets from the container size and the center's resting
    /// displacement.
    pub fn from_size(size: Size, center: Vec2) -> NavigatorResult<Self> {
        let Size { width, height } = size;
        if !(width.is_finite() && height.is_finite()) || width <= 0.0 || height <= 0.0 {
            return Err(NavigatorError::EmptyContainer { width, height });
        }

        let mut offsets = [center; 5];
        offsets[Position::Top.index()] = Vec2::new(center.x, center.y + height);
        offsets[Position::Bottom.index()] = Vec2::new(center.x, center.y - height);
        offsets[Position::Left.index()] = Vec2::new(center.x + width, center.y);
        offsets[Position::Right.index()] = Vec2::new(center.x - width, center.y);
        Ok(Self { offsets })
    }

    /// Target displacement for a position.
    pub fn get(&self, position: Position) -> Vec2 {
        self.offsets[position.index()]
    }

    /// The position whose target equals `offset` exactly, if any.
    pub fn position_at(&self, offset: Vec2) -> Option<Position> {
        Position::ALL.into_iter().find(|&p| self.get(p) == offset)
    }
}

/// Holds the live displacement of the center surface and the fixed targets.
#[derive(Debug, Clone, Default)]
pub struct OffsetModel {
    size: Size,
    targets: Option<SurfaceOffsets>,
    current: Vec2,
}

impl OffsetModel {
    /// Create a model with no container size yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every target from a new container size.
    ///
    /// Returns the previous targets, if any, so the caller can decide where
    /// the live displacement should land.
    pub fn recompute(
        &mut self,
        size: Size,
        center_rest: Vec2,
    ) -> NavigatorResult<Option<SurfaceOffsets>> {
        let targets = SurfaceOffsets::from_size(size, center_rest)?;
        let previous = self.targets.replace(targets);
        if previous.is_none() {
            self.current = center_rest;
        }
        self.size = size;
        Ok(previous)
    }

    /// Whether a container size has been applied.
    pub fn is_initialized(&self) -> bool {
        self.targets.is_some()
    }

    /// Container size the targets were derived from.
    pub fn size(&self) -> Size {
        self.size
    }

    /// All fixed targets.
    pub fn targets(&self) -> NavigatorResult<&SurfaceOffsets> {
        self.targets.as_ref().ok_or(NavigatorError::Uninitialized)
    }

    /// Fixed target displacement for a position.
    pub fn offset_for(&self, position: Position) -> NavigatorResult<Vec2> {
        self.targets().map(|t| t.get(position))
    }

    /// Whether the live displacement sits exactly on `position`'s target.
    pub fn is_active(&self, position: Position) -> bool {
        self.targets.is_some_and(|t| t.get(position) == self.current)
    }

    /// The position currently at rest in view, if any.
    pub fn active(&self) -> Option<Position> {
        self.targets.and_then(|t| t.position_at(self.current))
    }

    /// Live displacement of the center surface.
    pub fn current(&self) -> Vec2 {
        self.current
    }

    /// Overwrite the live displacement. No validation.
    pub fn set_current(&mut self, offset: Vec2) {
        self.current = offset;
    }

    /// Move the live displacement onto `position`'s target.
    pub fn settle(&mut self, position: Position) -> NavigatorResult<Vec2> {
        let target = self.offset_for(position)?;
        self.current = target;
        Ok(target)
    }
}
