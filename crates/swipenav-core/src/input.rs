//! Pointer stream to pan phase conversion.
//!
//! Hosts that deliver raw pointer events instead of recognized pan phases
//! feed them through [`PanRecognizer`], which emits the incremental
//! Begin/Changed/Ended sequence the gesture tracker expects.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::gesture::PanEvent;

/// Single-pointer event from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The host took the pointer away (e.g. a system gesture).
    Cancel,
}

/// Turns pointer events into pan phases.
#[derive(Debug, Clone, Default)]
pub struct PanRecognizer {
    /// Travel required before a pan begins.
    slop: f64,
    /// Where the pointer went down.
    press: Option<Point>,
    /// Last position reported as part of a pan.
    last: Option<Point>,
    /// Whether Begin has been emitted for the current press.
    panning: bool,
}

impl PanRecognizer {
    /// Create a recognizer with the given slop distance.
    pub fn new(slop: f64) -> Self {
        Self {
            slop,
            ..Self::default()
        }
    }

    /// Whether a pan is in progress.
    pub fn is_panning(&self) -> bool {
        self.panning
    }

    /// Feed a pointer event, returning the pan phases it produces.
    pub fn handle(&mut self, event: PointerEvent) -> Vec<PanEvent> {
        match event {
            PointerEvent::Down { position } => {
                if self.press.is_none() {
                    self.press = Some(position);
                    self.last = Some(position);
                    self.panning = false;
                }
                Vec::new()
            }
            PointerEvent::Move { position } => self.track(position),
            PointerEvent::Up { position } => {
                let mut events = self.track(position);
                if self.panning {
                    events.push(PanEvent::Ended);
                }
                self.clear();
                events
            }
            PointerEvent::Cancel => {
                let was_panning = self.panning;
                self.clear();
                if was_panning {
                    vec![PanEvent::Other]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn track(&mut self, position: Point) -> Vec<PanEvent> {
        let (Some(press), Some(last)) = (self.press, self.last) else {
            return Vec::new();
        };

        if !self.panning {
            let travel = position - press;
            if travel == Vec2::ZERO || travel.hypot() < self.slop {
                return Vec::new();
            }
            self.panning = true;
            self.last = Some(position);
            return vec![PanEvent::Begin, PanEvent::Changed(travel)];
        }

        let delta = position - last;
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        self.last = Some(position);
        vec![PanEvent::Changed(delta)]
    }

    fn clear(&mut self) {
        self.press = None;
        self.last = None;
        self.panning = false;
    }
}
