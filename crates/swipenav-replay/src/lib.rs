//! SwipeNav Replay
//!
//! Loads scripted gesture scenarios, drives a navigator with them and reports
//! the offsets and appearance signals they produce.

mod runner;
mod scenario;

pub use runner::{ReplayReport, Signal, StepRecord, TraceObserver, run, shows};
pub use scenario::{ReplayError, ReplayResult, Scenario, Step};
