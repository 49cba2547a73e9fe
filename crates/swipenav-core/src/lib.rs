//! SwipeNav Core Library
//!
//! Headless state machine for a five-slot swipe navigation container: one
//! center surface with up to four edge-adjacent surfaces, switched by pan
//! gestures or programmatic activation.

pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod input;
pub mod navigator;
pub mod snap;
pub mod surface;

pub use config::NavigatorConfig;
pub use error::{NavigatorError, NavigatorResult};
pub use geometry::{Axis, OffsetModel, Position, SurfaceOffsets};
pub use gesture::{DragState, EnabledFlags, PanEvent, PanOutcome, PanTracker};
pub use input::{PanRecognizer, PointerEvent};
pub use navigator::{
    AnimationRequest, AnimationStatus, Animator, AppearanceObserver, ImmediateAnimator,
    NoopObserver, SurfaceCommand, SurfaceQuery, SwipeNavigator, Transition, TransitionId,
};
pub use snap::{SnapThresholds, snap_along, snap_decision};
pub use surface::SurfaceSlots;
