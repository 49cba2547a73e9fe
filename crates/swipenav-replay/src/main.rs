//! Scenario replay entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use swipenav_core::Position;
use swipenav_replay::{ReplayError, ReplayResult, Scenario};

fn main() -> ExitCode {
    env_logger::init();

    match replay() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn replay() -> ReplayResult<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or(ReplayError::Usage)?;

    log::info!("Replaying {:?}", path);
    let scenario = Scenario::load(&path)?;
    let report = swipenav_replay::run(&scenario)?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    if !Position::ALL
        .into_iter()
        .any(|p| swipenav_replay::shows(&report, p))
    {
        log::warn!("Scenario ended mid-drag at {:?}", report.offset);
    }
    Ok(())
}
