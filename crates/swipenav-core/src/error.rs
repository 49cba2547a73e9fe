//! Error types for the navigator.

use thiserror::Error;

/// Navigator errors.
///
/// Only genuine configuration problems are reported here. Dragging into a
/// disabled surface or activating a slot with nothing registered is a no-op,
/// not an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NavigatorError {
    #[error("Container has no size yet; call recompute_offsets first")]
    Uninitialized,
    #[error("Container size must be positive and finite, got {width}x{height}")]
    EmptyContainer { width: f64, height: f64 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("No pending transition with id {0}")]
    UnknownTransition(u64),
}

/// Result type for navigator operations.
pub type NavigatorResult<T> = Result<T, NavigatorError>;
