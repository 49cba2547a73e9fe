//! Runs a scenario and records what happened.

use kurbo::Vec2;
use serde::Serialize;
use swipenav_core::{
    AppearanceObserver, ImmediateAnimator, NavigatorError, NavigatorResult, PanOutcome, Position,
    SurfaceCommand, SurfaceSlots, SwipeNavigator,
};

use crate::scenario::{ReplayError, ReplayResult, Scenario, Step};

/// Appearance signal as recorded in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "signal", rename_all = "snake_case")]
pub enum Signal {
    Begin {
        surface: Position,
        becoming_visible: bool,
        animated: bool,
    },
    End {
        surface: Position,
    },
    Attached {
        surface: Position,
    },
    Detached {
        surface: Position,
    },
}

/// Observer that keeps every signal in order.
#[derive(Debug, Default)]
pub struct TraceObserver {
    pub signals: Vec<Signal>,
}

impl AppearanceObserver for TraceObserver {
    fn begin_transition(&mut self, surface: Position, becoming_visible: bool, animated: bool) {
        self.signals.push(Signal::Begin {
            surface,
            becoming_visible,
            animated,
        });
    }

    fn end_transition(&mut self, surface: Position) {
        self.signals.push(Signal::End { surface });
    }

    fn surface_attached(&mut self, surface: Position) {
        self.signals.push(Signal::Attached { surface });
    }

    fn surface_detached(&mut self, surface: Position) {
        self.signals.push(Signal::Detached { surface });
    }
}

/// What one step produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepRecord {
    pub step: usize,
    /// Snap target, if the step ended a drag with one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snap: Option<Position>,
    pub offset: Vec2,
    pub active: Option<Position>,
}

/// Final state and trace of a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepRecord>,
    pub signals: Vec<Signal>,
    pub offset: Vec2,
    pub active: Option<Position>,
    pub settled: Position,
    /// Name of the surface in view, resolved through the owner-held slots.
    pub visible: Option<String>,
}

/// Replay `scenario` from a fresh navigator.
pub fn run(scenario: &Scenario) -> ReplayResult<ReplayReport> {
    let mut nav = SwipeNavigator::new(scenario.config, TraceObserver::default(), ImmediateAnimator)
        .map_err(at(0))?;
    nav.recompute_offsets(scenario.width, scenario.height, scenario.center_rest)
        .map_err(at(0))?;

    let mut slots = SurfaceSlots::new(surface_name(Position::Center));
    for &position in &scenario.surfaces {
        nav.attach_surface(&mut slots, position, Some(surface_name(position)))
            .map_err(at(0))?;
    }
    for &position in &scenario.disabled {
        nav.set_enabled(position, false);
    }

    let mut records = Vec::with_capacity(scenario.steps.len());
    for (index, step) in scenario.steps.iter().enumerate() {
        let step_no = index + 1;
        let snap = apply(&mut nav, &mut slots, step).map_err(at(step_no))?;
        if let Some(position) = snap {
            log::info!("Step {}: snapped to {:?}", step_no, position);
        }
        records.push(StepRecord {
            step: step_no,
            snap,
            offset: nav.current_offset(),
            active: nav.active_surface(),
        });
    }

    let visible = slots.active(&nav).cloned();
    Ok(ReplayReport {
        steps: records,
        offset: nav.current_offset(),
        active: nav.active_surface(),
        settled: nav.settled(),
        visible,
        signals: std::mem::take(&mut nav.observer_mut().signals),
    })
}

fn at(step: usize) -> impl FnOnce(NavigatorError) -> ReplayError {
    move |source| ReplayError::Navigator { step, source }
}

fn apply(
    nav: &mut SwipeNavigator<TraceObserver, ImmediateAnimator>,
    slots: &mut SurfaceSlots<String>,
    step: &Step,
) -> NavigatorResult<Option<Position>> {
    let snap_of = |outcome: &PanOutcome| match outcome {
        PanOutcome::Snap(position) => Some(*position),
        _ => None,
    };

    match step {
        Step::Pan(event) => Ok(snap_of(&nav.handle_pan(*event)?)),
        Step::Pointer(event) => Ok(nav.handle_pointer(*event)?.iter().find_map(snap_of)),
        Step::Activate(position) => nav.activate(*position).map(|_| None),
        Step::Done => nav.done().map(|_| None),
        Step::Resize { width, height } => {
            let rest = nav.offset_for(Position::Center)?;
            nav.recompute_offsets(*width, *height, rest).map(|_| None)
        }
        Step::SetEnabled { position, enabled } => {
            nav.set_enabled(*position, *enabled);
            Ok(None)
        }
        Step::Attach { position, name } => nav
            .attach_surface(slots, *position, name.clone())
            .map(|_| None),
    }
}

/// Default surface name for a position.
fn surface_name(position: Position) -> String {
    match position {
        Position::Center => "center",
        Position::Top => "top",
        Position::Bottom => "bottom",
        Position::Left => "left",
        Position::Right => "right",
    }
    .to_string()
}

/// Whether the replay ended at rest on `position`.
pub fn shows(report: &ReplayReport, position: Position) -> bool {
    report.active == Some(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    fn scenario(json: &str) -> Scenario {
        Scenario::from_json(json).unwrap()
    }

    #[test]
    fn test_swipe_to_left_and_back() {
        let report = run(&scenario(
            r#"{
                "width": 300, "height": 600,
                "surfaces": ["left"],
                "steps": [
                    { "pan": "begin" },
                    { "pan": { "changed": { "x": 8, "y": 1 } } },
                    { "pan": { "changed": { "x": 150, "y": 0 } } },
                    { "pan": { "changed": { "x": 20, "y": 0 } } },
                    { "pan": "ended" },
                    "done"
                ]
            }"#,
        ))
        .unwrap();

        assert_eq!(report.steps[4].snap, Some(Position::Left));
        assert_eq!(report.steps[4].active, Some(Position::Left));
        assert_eq!(report.active, Some(Position::Center));
        assert_eq!(report.offset, Vec2::ZERO);
        assert_eq!(report.visible.as_deref(), Some("center"));
        assert_eq!(
            report.signals[0],
            Signal::Attached { surface: Position::Left }
        );
    }

    #[test]
    fn test_pointer_scenario_snaps_bottom() {
        let report = run(&scenario(
            r#"{
                "width": 300, "height": 600,
                "surfaces": ["bottom"],
                "config": { "pan_slop": 10 },
                "steps": [
                    { "pointer": { "down": { "position": { "x": 150, "y": 500 } } } },
                    { "pointer": { "move": { "position": { "x": 150, "y": 480 } } } },
                    { "pointer": { "move": { "position": { "x": 150, "y": 200 } } } },
                    { "pointer": { "up": { "position": { "x": 150, "y": 100 } } } }
                ]
            }"#,
        ))
        .unwrap();

        assert_eq!(report.steps[3].snap, Some(Position::Bottom));
        assert!(shows(&report, Position::Bottom));
        assert_eq!(report.visible.as_deref(), Some("bottom"));
    }

    #[test]
    fn test_disabled_surface_is_a_wall() {
        let report = run(&scenario(
            r#"{
                "width": 300, "height": 600,
                "surfaces": ["left", "right"],
                "disabled": ["left", "right"],
                "steps": [
                    { "pan": "begin" },
                    { "pan": { "changed": { "x": 10, "y": 0 } } },
                    { "pan": { "changed": { "x": 200, "y": 0 } } },
                    { "pan": { "changed": { "x": -400, "y": 0 } } },
                    { "pan": "ended" }
                ]
            }"#,
        ))
        .unwrap();

        assert!(report.steps.iter().all(|s| s.offset.x == 0.0));
        assert_eq!(report.settled, Position::Center);
    }

    #[test]
    fn test_navigator_error_carries_step() {
        let result = run(&scenario(
            r#"{ "width": 0, "height": 600, "steps": [] }"#,
        ));
        assert!(matches!(result, Err(ReplayError::Navigator { step: 0, .. })));
    }

    #[test]
    fn test_resize_keeps_active_surface() {
        let report = run(&scenario(
            r#"{
                "width": 300, "height": 600,
                "surfaces": ["top"],
                "steps": [
                    { "activate": "top" },
                    { "resize": { "width": 320, "height": 640 } }
                ]
            }"#,
        ))
        .unwrap();
        assert_eq!(report.offset, Vec2::new(0.0, 640.0));
        assert_eq!(report.active, Some(Position::Top));
    }

    #[test]
    fn test_bundled_scenario() {
        let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("scenarios")
            .join("swipe_left_and_back.json");
        let report = run(&Scenario::load(&path).unwrap()).unwrap();

        assert_eq!(report.steps[4].snap, Some(Position::Left));
        assert_eq!(report.steps[8].snap, Some(Position::Center));
        assert_eq!(report.active, Some(Position::Top));
        assert_eq!(report.offset, Vec2::new(0.0, 896.0));
        assert_eq!(report.visible.as_deref(), Some("top"));
    }

    #[test]
    fn test_report_serializes() {
        let report = run(&scenario(
            r#"{ "width": 300, "height": 600, "steps": ["done"] }"#,
        ))
        .unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["settled"], "center");
        assert_eq!(json["steps"][0]["step"], 1);
    }
}
