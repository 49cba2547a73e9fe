//! The five-slot swipe navigator.
//!
//! [`SwipeNavigator`] owns the offset model and the pan tracker, commits snap
//! decisions and programmatic activations, and brackets every commit with
//! appearance signals. Animation and appearance handling are delegated to the
//! host through [`Animator`] and [`AppearanceObserver`].
//!
//! Logical state changes synchronously: the moment a commit is requested the
//! live offset already equals the target. The animator only interpolates the
//! visuals, so a new drag that starts before the animation completes reads the
//! committed offset.

use kurbo::{Size, Vec2};

use crate::config::NavigatorConfig;
use crate::error::{NavigatorError, NavigatorResult};
use crate::geometry::{OffsetModel, Position};
use crate::gesture::{DragState, EnabledFlags, PanEvent, PanOutcome, PanTracker};
use crate::input::{PanRecognizer, PointerEvent};
use crate::snap::SnapThresholds;
use crate::surface::SurfaceSlots;

/// Query capability handed to embedded surfaces.
pub trait SurfaceQuery {
    /// Whether `position` is the surface at rest in view.
    fn is_active(&self, position: Position) -> bool;
}

/// Command capability handed to embedded surfaces.
pub trait SurfaceCommand {
    /// Bring `position` into view.
    fn activate(&mut self, position: Position) -> NavigatorResult<Option<Transition>>;

    /// Return to the center surface.
    fn done(&mut self) -> NavigatorResult<Option<Transition>> {
        self.activate(Position::Center)
    }
}

/// Receives appearance and attachment signals for surfaces.
pub trait AppearanceObserver {
    /// A surface is about to become visible or hidden.
    fn begin_transition(&mut self, surface: Position, becoming_visible: bool, animated: bool);

    /// The transition started by the matching `begin_transition` finished.
    fn end_transition(&mut self, surface: Position);

    /// A surface was registered at `surface`.
    fn surface_attached(&mut self, _surface: Position) {}

    /// The surface at `surface` was removed.
    fn surface_detached(&mut self, _surface: Position) {}
}

/// Observer that ignores every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl AppearanceObserver for NoopObserver {
    fn begin_transition(&mut self, _surface: Position, _becoming_visible: bool, _animated: bool) {}
    fn end_transition(&mut self, _surface: Position) {}
}

/// Identifies a commit whose animation may still be running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(pub u64);

/// Visual interpolation requested from the animator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub id: TransitionId,
    pub from: Vec2,
    pub to: Vec2,
    pub duration: f64,
}

/// Whether an animation completed inside `animate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStatus {
    Finished,
    /// The host calls [`SwipeNavigator::finish_transition`] when done.
    Pending,
}

/// Runs the visual part of a commit.
pub trait Animator {
    fn animate(&mut self, request: AnimationRequest) -> AnimationStatus;
}

/// Animator that completes every request immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateAnimator;

impl Animator for ImmediateAnimator {
    fn animate(&mut self, _request: AnimationRequest) -> AnimationStatus {
        AnimationStatus::Finished
    }
}

/// A committed surface change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub id: TransitionId,
    /// Surface the offset now rests on.
    pub target: Position,
    /// Surface that lost visibility, if the commit changed surfaces.
    pub losing: Option<Position>,
    /// Surface that gained visibility, if the commit changed surfaces.
    pub gaining: Option<Position>,
    pub animated: bool,
}

impl Transition {
    /// Whether the commit re-settled the center without a visibility change.
    pub fn is_resnap(&self) -> bool {
        self.losing.is_none() && self.gaining.is_none()
    }
}

/// Five-slot navigator driven by pan gestures and programmatic activation.
#[derive(Debug)]
pub struct SwipeNavigator<O = NoopObserver, A = ImmediateAnimator> {
    config: NavigatorConfig,
    thresholds: SnapThresholds,
    model: OffsetModel,
    flags: EnabledFlags,
    /// Positions with a registered surface. The center always has one.
    configured: [bool; 5],
    pan: PanTracker,
    recognizer: PanRecognizer,
    /// Target of the most recent commit.
    settled: Position,
    pending: Vec<Transition>,
    next_transition: u64,
    observer: O,
    animator: A,
}

impl SwipeNavigator {
    /// Navigator with default configuration, no observer and instant
    /// animations.
    pub fn headless() -> Self {
        Self::with_config(NavigatorConfig::default(), NoopObserver, ImmediateAnimator)
    }
}

impl<O: AppearanceObserver, A: Animator> SwipeNavigator<O, A> {
    /// Create a navigator after validating `config`.
    pub fn new(config: NavigatorConfig, observer: O, animator: A) -> NavigatorResult<Self> {
        config.validate()?;
        Ok(Self::with_config(config, observer, animator))
    }

    fn with_config(config: NavigatorConfig, observer: O, animator: A) -> Self {
        let mut configured = [false; 5];
        configured[Position::Center.index()] = true;
        Self {
            thresholds: SnapThresholds::from(&config),
            recognizer: PanRecognizer::new(config.pan_slop),
            config,
            model: OffsetModel::new(),
            flags: EnabledFlags::none(),
            configured,
            pan: PanTracker::new(),
            settled: Position::Center,
            pending: Vec::new(),
            next_transition: 0,
            observer,
            animator,
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    // --- Geometry ---

    /// Recompute the fixed offsets for a new container size.
    ///
    /// On a resize after the first layout the settled surface stays in view:
    /// the live offset jumps to its new target and any drag in progress is
    /// abandoned.
    pub fn recompute_offsets(
        &mut self,
        width: f64,
        height: f64,
        center_rest: Vec2,
    ) -> NavigatorResult<()> {
        let previous = self.model.recompute(Size::new(width, height), center_rest)?;
        if previous.is_some() {
            if self.pan.is_dragging() {
                log::debug!("Resize during drag, abandoning the drag");
                self.pan.reset();
            }
            self.model.settle(self.settled)?;
        }
        log::debug!(
            "Offsets recomputed for {}x{}, settled on {:?}",
            width,
            height,
            self.settled
        );
        Ok(())
    }

    /// Fixed offset of a surface.
    pub fn offset_for(&self, position: Position) -> NavigatorResult<Vec2> {
        self.model.offset_for(position)
    }

    /// Live displacement of the center surface.
    pub fn current_offset(&self) -> Vec2 {
        self.model.current()
    }

    /// Overwrite the live displacement. Clamping is the gesture's job.
    pub fn set_current_offset(&mut self, offset: Vec2) {
        self.model.set_current(offset);
    }

    /// The surface at rest in view, derived from the live offset.
    pub fn active_surface(&self) -> Option<Position> {
        self.model.active()
    }

    /// Target of the most recent commit, or the surface a drag came to rest
    /// on without one.
    pub fn settled(&self) -> Position {
        self.settled
    }

    /// Surface in view: the one at rest under the live offset, or the settled
    /// one while the offset sits between targets.
    pub fn in_view(&self) -> Position {
        self.model.active().unwrap_or(self.settled)
    }

    pub fn offset_model(&self) -> &OffsetModel {
        &self.model
    }

    // --- Flags and registration ---

    pub fn is_enabled(&self, position: Position) -> bool {
        self.flags.is_enabled(position)
    }

    /// Allow or forbid dragging into `position`. Does not affect
    /// programmatic activation.
    pub fn set_enabled(&mut self, position: Position, enabled: bool) {
        self.flags.set(position, enabled);
    }

    pub fn enabled_flags(&self) -> &EnabledFlags {
        &self.flags
    }

    /// Whether a surface is registered at `position`.
    pub fn is_configured(&self, position: Position) -> bool {
        self.configured[position.index()]
    }

    /// Record whether a surface exists at `position`, and enable dragging
    /// into it accordingly.
    ///
    /// Removing the surface in view returns to the center first.
    pub fn set_surface_present(
        &mut self,
        position: Position,
        present: bool,
    ) -> NavigatorResult<()> {
        if position == Position::Center {
            return Ok(());
        }
        if !present && self.is_configured(position) && self.in_view() == position {
            self.commit_to(Position::Center, true)?;
        }
        self.configured[position.index()] = present;
        self.flags.set(position, present);
        Ok(())
    }

    /// Register, replace or clear the surface at an auxiliary position.
    ///
    /// Returns the surface the slots no longer hold: the replaced or cleared
    /// one, or `surface` itself when it is already registered there or when
    /// `position` is the center.
    pub fn attach_surface<S: PartialEq>(
        &mut self,
        slots: &mut SurfaceSlots<S>,
        position: Position,
        surface: Option<S>,
    ) -> NavigatorResult<Option<S>> {
        if position == Position::Center {
            log::warn!("The center surface is fixed; use SurfaceSlots::replace_center");
            return Ok(surface);
        }

        self.set_surface_present(position, surface.is_some())?;
        if surface.is_some() && slots.get(position) == surface.as_ref() {
            return Ok(surface);
        }

        let previous = slots.replace(position, surface);
        if previous.is_some() {
            self.observer.begin_transition(position, false, false);
            self.observer.end_transition(position);
            self.observer.surface_detached(position);
        }
        if slots.is_occupied(position) {
            self.observer.surface_attached(position);
            log::debug!("Surface attached at {:?}", position);
        }
        Ok(previous)
    }

    // --- Gestures ---

    /// Whether a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        self.pan.is_dragging()
    }

    /// State of the drag in progress.
    pub fn drag_state(&self) -> Option<&DragState> {
        self.pan.drag()
    }

    /// Feed one pan sample; a snap decision at the end is committed animated.
    pub fn handle_pan(&mut self, event: PanEvent) -> NavigatorResult<PanOutcome> {
        let outcome = self
            .pan
            .handle(event, &mut self.model, &self.flags, &self.thresholds)?;
        match outcome {
            PanOutcome::Snap(position) => {
                self.commit_to(position, true)?;
            }
            PanOutcome::Released | PanOutcome::Cancelled => {
                if let Some(position) = self.model.active() {
                    self.settled = position;
                }
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Feed a raw pointer event through the pan recognizer.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> NavigatorResult<Vec<PanOutcome>> {
        self.recognizer
            .handle(event)
            .into_iter()
            .map(|pan| self.handle_pan(pan))
            .collect()
    }

    // --- Commits ---

    /// Move to `position`'s fixed offset and signal the surfaces involved.
    ///
    /// Re-committing the center while it is in view fires no signals but
    /// still runs the animation. Snapping back onto an auxiliary surface
    /// signals it as gaining and the center as losing.
    pub fn commit_to(&mut self, position: Position, animated: bool) -> NavigatorResult<Transition> {
        let from = self.model.current();
        let previous = self.in_view();
        let to = self.model.settle(position)?;
        self.settled = position;

        let (losing, gaining) = if previous != position {
            (Some(previous), Some(position))
        } else if position != Position::Center {
            (Some(Position::Center), Some(position))
        } else {
            (None, None)
        };

        let id = TransitionId(self.next_transition);
        self.next_transition += 1;
        let transition = Transition {
            id,
            target: position,
            losing,
            gaining,
            animated,
        };

        if let Some(surface) = losing {
            self.observer.begin_transition(surface, false, animated);
        }
        if let Some(surface) = gaining {
            self.observer.begin_transition(surface, true, animated);
        }

        if previous == position {
            log::debug!("Snapping back to {:?}", position);
        } else {
            log::info!("Switching from {:?} to {:?}", previous, position);
        }

        let status = if animated {
            self.animator.animate(AnimationRequest {
                id,
                from,
                to,
                duration: self.config.animation_duration,
            })
        } else {
            AnimationStatus::Finished
        };

        match status {
            AnimationStatus::Finished => self.end_signals(&transition),
            AnimationStatus::Pending => self.pending.push(transition),
        }
        Ok(transition)
    }

    /// Called by the host when the animation for `id` completes.
    pub fn finish_transition(&mut self, id: TransitionId) -> NavigatorResult<()> {
        let Some(index) = self.pending.iter().position(|t| t.id == id) else {
            log::warn!("Completion for unknown transition {:?}", id);
            return Err(NavigatorError::UnknownTransition(id.0));
        };
        let transition = self.pending.remove(index);
        self.end_signals(&transition);
        Ok(())
    }

    /// Commits whose animation has not completed yet.
    pub fn pending_transitions(&self) -> &[Transition] {
        &self.pending
    }

    fn end_signals(&mut self, transition: &Transition) {
        if let Some(surface) = transition.gaining {
            self.observer.end_transition(surface);
        }
        if let Some(surface) = transition.losing {
            self.observer.end_transition(surface);
        }
    }

    // --- Container appearance forwarding ---

    /// The container itself is about to appear.
    pub fn container_will_appear(&mut self, animated: bool) {
        let surface = self.in_view();
        self.observer.begin_transition(surface, true, animated);
    }

    /// The container itself finished appearing.
    pub fn container_did_appear(&mut self) {
        let surface = self.in_view();
        self.observer.end_transition(surface);
    }

    /// The container itself is about to disappear.
    pub fn container_will_disappear(&mut self, animated: bool) {
        let surface = self.in_view();
        self.observer.begin_transition(surface, false, animated);
    }

    /// The container itself finished disappearing.
    pub fn container_did_disappear(&mut self) {
        let surface = self.in_view();
        self.observer.end_transition(surface);
    }
}

impl<O: AppearanceObserver, A: Animator> SurfaceQuery for SwipeNavigator<O, A> {
    fn is_active(&self, position: Position) -> bool {
        self.model.is_active(position)
    }
}

impl<O: AppearanceObserver, A: Animator> SurfaceCommand for SwipeNavigator<O, A> {
    /// Programmatic activation.
    ///
    /// Ignored (with a warning) for an auxiliary position that has no
    /// registered surface and is not already in view. The enabled flag is not
    /// consulted.
    fn activate(&mut self, position: Position) -> NavigatorResult<Option<Transition>> {
        if !self.is_configured(position) && !self.model.is_active(position) {
            log::warn!("Ignoring activation of {:?}: no surface registered", position);
            return Ok(None);
        }
        self.commit_to(position, true).map(Some)
    }
}
