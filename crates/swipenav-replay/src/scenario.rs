//! Scenario files.

use std::path::Path;

use kurbo::Vec2;
use serde::{Deserialize, Serialize};
use swipenav_core::{NavigatorConfig, PanEvent, PointerEvent, Position};
use thiserror::Error;

/// Replay errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Scenario parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Navigator error at step {step}: {source}")]
    Navigator {
        step: usize,
        #[source]
        source: swipenav_core::NavigatorError,
    },
    #[error("Usage: swipenav-replay <scenario.json>")]
    Usage,
}

/// Result type for replay operations.
pub type ReplayResult<T> = Result<T, ReplayError>;

/// A scripted session against one navigator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub config: NavigatorConfig,
    pub width: f64,
    pub height: f64,
    /// Resting displacement of the center surface.
    #[serde(default)]
    pub center_rest: Vec2,
    /// Auxiliary positions that get a surface before the first step.
    #[serde(default)]
    pub surfaces: Vec<Position>,
    /// Registered positions whose drag flag starts off.
    #[serde(default)]
    pub disabled: Vec<Position>,
    pub steps: Vec<Step>,
}

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Pan(PanEvent),
    Pointer(PointerEvent),
    Activate(Position),
    Done,
    Resize { width: f64, height: f64 },
    SetEnabled { position: Position, enabled: bool },
    Attach { position: Position, name: Option<String> },
}

impl Scenario {
    /// Parse a scenario from JSON text.
    pub fn from_json(text: &str) -> ReplayResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scenario file.
    pub fn load(path: &Path) -> ReplayResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
