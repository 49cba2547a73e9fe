//! Pan gesture interpretation.
//!
//! A drag is locked to a single axis. When a drag starts with an auxiliary
//! surface in view, the axis that surface lives on is locked immediately;
//! from the center the first movement sample picks the axis. Movement is then
//! clamped so a drag can only expose surfaces that are enabled, or the one
//! that is already showing.

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::NavigatorResult;
use crate::geometry::{Axis, OffsetModel, Position, SurfaceOffsets};
use crate::snap::{SnapThresholds, snap_decision};

/// A phase-tagged pan sample.
///
/// `Changed` deltas are incremental: each one is relative to the previous
/// sample, not to the start of the drag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanEvent {
    Begin,
    Changed(Vec2),
    Ended,
    /// Cancelled, failed, or any phase without a rule of its own.
    Other,
}

/// Which auxiliary surfaces a drag may move into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnabledFlags {
    flags: [bool; 5],
}

impl Default for EnabledFlags {
    fn default() -> Self {
        Self::none()
    }
}

impl EnabledFlags {
    /// Every auxiliary surface disabled.
    pub fn none() -> Self {
        let mut flags = [false; 5];
        flags[Position::Center.index()] = true;
        Self { flags }
    }

    /// Every auxiliary surface enabled.
    pub fn all() -> Self {
        Self { flags: [true; 5] }
    }

    /// Whether `position` can be dragged into. The center always can.
    pub fn is_enabled(&self, position: Position) -> bool {
        self.flags[position.index()]
    }

    /// Enable or disable an auxiliary surface. The center cannot be disabled.
    pub fn set(&mut self, position: Position, enabled: bool) {
        if position != Position::Center {
            self.flags[position.index()] = enabled;
        }
    }
}

/// Transient state of a drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DragState {
    /// Axis the drag is locked to.
    pub axis: Axis,
    /// Last nonzero movement seen on each axis, tracked independently.
    pub last_non_zero_delta: Vec2,
}

impl DragState {
    /// Start a drag, locking the axis of whatever surface is in view.
    pub fn begin(active: Option<Position>) -> Self {
        Self {
            axis: active.and_then(Position::axis).unwrap_or(Axis::Undefined),
            last_non_zero_delta: Vec2::ZERO,
        }
    }

    /// Remember the nonzero components of `delta`.
    ///
    /// A purely horizontal sample leaves the vertical inertia alone and vice
    /// versa.
    pub fn record(&mut self, delta: Vec2) {
        if delta.x != 0.0 {
            self.last_non_zero_delta.x = delta.x;
        }
        if delta.y != 0.0 {
            self.last_non_zero_delta.y = delta.y;
        }
    }

    /// Lock the axis from the first movement sample.
    ///
    /// Horizontal only when strictly more horizontal travel; equal travel
    /// locks vertical.
    pub fn classify(&mut self, delta: Vec2) -> Axis {
        if self.axis == Axis::Undefined {
            self.axis = if delta.x.abs() > delta.y.abs() {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
        }
        self.axis
    }
}

/// Apply `delta` along `axis`, clamped to the range the flags allow.
///
/// A surface that is already partly or fully showing stays reachable even
/// when its flag is off, so it can always be dragged back to center. A
/// disabled surface that is not showing is a wall at the center offset.
pub fn clamp_along(
    axis: Axis,
    current: Vec2,
    delta: Vec2,
    targets: &SurfaceOffsets,
    flags: &EnabledFlags,
) -> Vec2 {
    let Some((positive, negative)) = axis.targets() else {
        return current;
    };

    let center = axis.component(targets.get(Position::Center));
    let value = axis.component(current);
    let showing_negative = value < center;
    let showing_positive = value > center;

    let min = if showing_negative || flags.is_enabled(negative) {
        axis.component(targets.get(negative))
    } else {
        center
    };
    let max = if showing_positive || flags.is_enabled(positive) {
        axis.component(targets.get(positive))
    } else {
        center
    };

    let next = (value + axis.component(delta)).max(min).min(max);
    axis.with_component(current, next)
}

/// What a single pan sample did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// The sample arrived in a phase where it has no meaning.
    Ignored,
    /// A drag started with this axis lock (possibly undefined).
    Started(Axis),
    /// The first movement sample locked the axis. The sample is consumed by
    /// the classification and does not move the surface.
    AxisLocked(Axis),
    /// The live offset moved (or was held at a clamp wall).
    Moved(Vec2),
    /// The drag ended and should settle on this surface.
    Snap(Position),
    /// The drag ended without a snap target.
    Released,
    /// The drag was abandoned.
    Cancelled,
}

/// Idle/dragging state machine over an [`OffsetModel`].
#[derive(Debug, Clone, Default)]
pub struct PanTracker {
    drag: Option<DragState>,
}

impl PanTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current drag, if one is in progress.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Drop any drag in progress.
    pub fn reset(&mut self) {
        self.drag = None;
    }

    /// Feed one pan sample.
    ///
    /// Mutates the model's live offset while dragging. The snap decision is
    /// returned, not committed; committing is the navigator's job.
    pub fn handle(
        &mut self,
        event: PanEvent,
        model: &mut OffsetModel,
        flags: &EnabledFlags,
        thresholds: &SnapThresholds,
    ) -> NavigatorResult<PanOutcome> {
        match event {
            PanEvent::Begin => {
                model.targets()?;
                let drag = DragState::begin(model.active());
                log::debug!("Pan began, axis {:?}", drag.axis);
                self.drag = Some(drag);
                Ok(PanOutcome::Started(drag.axis))
            }
            PanEvent::Changed(delta) => {
                let Some(drag) = self.drag.as_mut() else {
                    return Ok(PanOutcome::Ignored);
                };
                let targets = *model.targets()?;
                drag.record(delta);

                if drag.axis == Axis::Undefined {
                    let axis = drag.classify(delta);
                    log::debug!("Pan axis locked to {:?} by delta {:?}", axis, delta);
                    return Ok(PanOutcome::AxisLocked(axis));
                }

                let next = clamp_along(drag.axis, model.current(), delta, &targets, flags);
                model.set_current(next);
                Ok(PanOutcome::Moved(next))
            }
            PanEvent::Ended => {
                let Some(drag) = self.drag.take() else {
                    return Ok(PanOutcome::Ignored);
                };
                let decision = snap_decision(
                    drag.axis,
                    model.current(),
                    drag.last_non_zero_delta,
                    model.size(),
                    thresholds,
                );
                log::debug!(
                    "Pan ended at {:?} on {:?} (inertia {:?}), snap {:?}",
                    model.current(),
                    drag.axis,
                    drag.last_non_zero_delta,
                    decision
                );
                Ok(decision.map_or(PanOutcome::Released, PanOutcome::Snap))
            }
            PanEvent::Other => {
                if self.drag.take().is_some() {
                    Ok(PanOutcome::Cancelled)
                } else {
                    Ok(PanOutcome::Ignored)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn model() -> OffsetModel {
        let mut model = OffsetModel::new();
        model.recompute(Size::new(300.0, 600.0), Vec2::ZERO).unwrap();
        model
    }

    fn feed(
        tracker: &mut PanTracker,
        model: &mut OffsetModel,
        flags: &EnabledFlags,
        events: &[PanEvent],
    ) -> Vec<PanOutcome> {
        events
            .iter()
            .map(|&e| tracker.handle(e, model, flags, &SnapThresholds::default()).unwrap())
            .collect()
    }

    #[test]
    fn test_tie_resolves_vertical() {
        let mut drag = DragState::begin(Some(Position::Center));
        assert_eq!(drag.axis, Axis::Undefined);
        assert_eq!(drag.classify(Vec2::new(7.0, -7.0)), Axis::Vertical);
    }

    #[test]
    fn test_classify_prefers_larger_travel() {
        let mut drag = DragState::default();
        assert_eq!(drag.classify(Vec2::new(-8.0, 3.0)), Axis::Horizontal);

        let mut drag = DragState::default();
        assert_eq!(drag.classify(Vec2::new(2.0, 3.0)), Axis::Vertical);
    }

    #[test]
    fn test_classify_keeps_existing_lock() {
        let mut drag = DragState::begin(Some(Position::Left));
        assert_eq!(drag.classify(Vec2::new(0.0, 50.0)), Axis::Horizontal);
    }

    #[test]
    fn test_begin_locks_from_active_surface() {
        assert_eq!(DragState::begin(Some(Position::Top)).axis, Axis::Vertical);
        assert_eq!(DragState::begin(Some(Position::Bottom)).axis, Axis::Vertical);
        assert_eq!(DragState::begin(Some(Position::Left)).axis, Axis::Horizontal);
        assert_eq!(DragState::begin(Some(Position::Right)).axis, Axis::Horizontal);
        assert_eq!(DragState::begin(None).axis, Axis::Undefined);
    }

    #[test]
    fn test_independent_inertia() {
        let mut drag = DragState::begin(Some(Position::Top));
        drag.record(Vec2::new(10.0, 0.0));
        drag.record(Vec2::new(0.0, -10.0));
        assert_eq!(drag.last_non_zero_delta, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn test_independent_inertia_through_tracker() {
        let mut model = model();
        model.settle(Position::Top).unwrap();
        let mut tracker = PanTracker::new();
        let flags = EnabledFlags::all();
        feed(
            &mut tracker,
            &mut model,
            &flags,
            &[
                PanEvent::Begin,
                PanEvent::Changed(Vec2::new(10.0, 0.0)),
                PanEvent::Changed(Vec2::new(0.0, -10.0)),
            ],
        );
        let drag = tracker.drag().unwrap();
        assert_eq!(drag.axis, Axis::Vertical);
        assert_eq!(drag.last_non_zero_delta.x, 10.0);
        assert_eq!(drag.last_non_zero_delta.y, -10.0);
        assert_eq!(model.current(), Vec2::new(0.0, 590.0));
    }

    #[test]
    fn test_clamp_wall_when_disabled() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let flags = EnabledFlags::none();
        let deltas = [40.0, -90.0, 300.0, -1000.0, 0.5, -0.5, 2000.0];

        tracker
            .handle(PanEvent::Begin, &mut model, &flags, &SnapThresholds::default())
            .unwrap();
        tracker
            .handle(
                PanEvent::Changed(Vec2::new(5.0, 0.0)),
                &mut model,
                &flags,
                &SnapThresholds::default(),
            )
            .unwrap();
        assert_eq!(tracker.drag().unwrap().axis, Axis::Horizontal);

        for dx in deltas {
            tracker
                .handle(
                    PanEvent::Changed(Vec2::new(dx, 0.0)),
                    &mut model,
                    &flags,
                    &SnapThresholds::default(),
                )
                .unwrap();
            assert_eq!(model.current().x, 0.0);
        }
    }

    #[test]
    fn test_clamp_to_enabled_surface_extent() {
        let targets = *model().targets().unwrap();
        let mut flags = EnabledFlags::none();
        flags.set(Position::Left, true);

        let moved = clamp_along(
            Axis::Horizontal,
            Vec2::ZERO,
            Vec2::new(500.0, 0.0),
            &targets,
            &flags,
        );
        assert_eq!(moved, Vec2::new(300.0, 0.0));

        // Right is still a wall.
        let moved = clamp_along(
            Axis::Horizontal,
            Vec2::ZERO,
            Vec2::new(-500.0, 0.0),
            &targets,
            &flags,
        );
        assert_eq!(moved, Vec2::ZERO);
    }

    #[test]
    fn test_showing_surface_stays_draggable_when_disabled() {
        let targets = *model().targets().unwrap();
        let flags = EnabledFlags::none();

        let at_left = targets.get(Position::Left);
        let moved = clamp_along(
            Axis::Horizontal,
            at_left,
            Vec2::new(-100.0, 0.0),
            &targets,
            &flags,
        );
        assert_eq!(moved, Vec2::new(200.0, 0.0));

        // Overshooting past center stops at the center wall.
        let moved = clamp_along(Axis::Horizontal, moved, Vec2::new(-500.0, 0.0), &targets, &flags);
        assert_eq!(moved, Vec2::ZERO);
    }

    #[test]
    fn test_vertical_clamp_uses_top_and_bottom() {
        let targets = *model().targets().unwrap();
        let mut flags = EnabledFlags::none();
        flags.set(Position::Bottom, true);

        let moved = clamp_along(
            Axis::Vertical,
            Vec2::ZERO,
            Vec2::new(0.0, -900.0),
            &targets,
            &flags,
        );
        assert_eq!(moved, Vec2::new(0.0, -600.0));
        let moved = clamp_along(
            Axis::Vertical,
            Vec2::ZERO,
            Vec2::new(0.0, 900.0),
            &targets,
            &flags,
        );
        assert_eq!(moved, Vec2::ZERO);
    }

    #[test]
    fn test_center_flag_cannot_be_cleared() {
        let mut flags = EnabledFlags::all();
        flags.set(Position::Center, false);
        assert!(flags.is_enabled(Position::Center));
    }

    #[test]
    fn test_first_sample_only_locks_axis() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let outcomes = feed(
            &mut tracker,
            &mut model,
            &EnabledFlags::all(),
            &[PanEvent::Begin, PanEvent::Changed(Vec2::new(30.0, 2.0))],
        );
        assert_eq!(outcomes[0], PanOutcome::Started(Axis::Undefined));
        assert_eq!(outcomes[1], PanOutcome::AxisLocked(Axis::Horizontal));
        assert_eq!(model.current(), Vec2::ZERO);
        assert_eq!(tracker.drag().unwrap().last_non_zero_delta, Vec2::new(30.0, 2.0));
    }

    #[test]
    fn test_full_drag_snaps_left() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let outcomes = feed(
            &mut tracker,
            &mut model,
            &EnabledFlags::all(),
            &[
                PanEvent::Begin,
                PanEvent::Changed(Vec2::new(10.0, 0.0)),
                PanEvent::Changed(Vec2::new(100.0, 4.0)),
                PanEvent::Changed(Vec2::new(60.0, 0.0)),
                PanEvent::Ended,
            ],
        );
        assert_eq!(model.current(), Vec2::new(160.0, 0.0));
        assert_eq!(outcomes.last(), Some(&PanOutcome::Snap(Position::Left)));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_changed_without_begin_is_ignored() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let outcomes = feed(
            &mut tracker,
            &mut model,
            &EnabledFlags::all(),
            &[PanEvent::Changed(Vec2::new(80.0, 0.0)), PanEvent::Ended],
        );
        assert_eq!(outcomes, vec![PanOutcome::Ignored, PanOutcome::Ignored]);
        assert_eq!(model.current(), Vec2::ZERO);
    }

    #[test]
    fn test_ended_without_movement_releases() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let outcomes = feed(
            &mut tracker,
            &mut model,
            &EnabledFlags::all(),
            &[PanEvent::Begin, PanEvent::Ended],
        );
        assert_eq!(outcomes[1], PanOutcome::Released);
        assert!(tracker.drag().is_none());
    }

    #[test]
    fn test_other_phase_cancels_without_moving() {
        let mut model = model();
        let mut tracker = PanTracker::new();
        let outcomes = feed(
            &mut tracker,
            &mut model,
            &EnabledFlags::all(),
            &[
                PanEvent::Begin,
                PanEvent::Changed(Vec2::new(0.0, -10.0)),
                PanEvent::Changed(Vec2::new(0.0, -120.0)),
                PanEvent::Other,
                PanEvent::Other,
            ],
        );
        assert_eq!(outcomes[3], PanOutcome::Cancelled);
        assert_eq!(outcomes[4], PanOutcome::Ignored);
        assert_eq!(model.current(), Vec2::new(0.0, -120.0));
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_begin_requires_geometry() {
        let mut model = OffsetModel::new();
        let mut tracker = PanTracker::new();
        let result = tracker.handle(
            PanEvent::Begin,
            &mut model,
            &EnabledFlags::all(),
            &SnapThresholds::default(),
        );
        assert!(result.is_err());
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_pan_event_json() {
        let event: PanEvent =
            serde_json::from_str(r#"{ "changed": { "x": 3.0, "y": -1.0 } }"#).unwrap();
        assert_eq!(event, PanEvent::Changed(Vec2::new(3.0, -1.0)));
        let event: PanEvent = serde_json::from_str(r#""ended""#).unwrap();
        assert_eq!(event, PanEvent::Ended);
    }
}
