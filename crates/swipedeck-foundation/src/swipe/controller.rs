//! The swipe-card state machine.
//!
//! ```text
//! Idle --begin_gesture--> Tracking --end_gesture--> Resolving --animation end--> Idle
//!   \________________________force_swipe_______________/^
//! ```
//!
//! While tracking, the card follows the pointer 1:1. On release the outcome
//! is decided from displacement first and velocity second, the card animates
//! to its resting point, and exactly one outcome callback fires when the
//! animation completes.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use swipedeck_animation::{Animatable, AnimationType};
use swipedeck_core::{Offset, RuntimeHandle};

use super::handler::dispatch_outcome;
use super::{
    CardPosition, GestureSample, SwipeConfig, SwipeDirection, SwipeError, SwipeHandler,
    SwipeOutcome, SwipeState,
};

/// Drives one card: tracks the drag, decides the outcome and animates it.
///
/// Cloning yields another handle to the same controller. The in-flight
/// animation is cancelled, without a callback, once every handle is dropped.
#[derive(Clone)]
pub struct SwipeGestureController {
    inner: Rc<RefCell<ControllerInner>>,
    config: Rc<Cell<SwipeConfig>>,
    position: Animatable<Offset>,
}

struct ControllerInner {
    handler: Rc<dyn SwipeHandler>,
    state: SwipeState,
    sample: GestureSample,
    revealed: bool,
    pending: Option<SwipeOutcome>,
}

impl SwipeGestureController {
    /// Creates a controller, falling back to [`SwipeConfig::default`] when
    /// `config` does not validate.
    pub fn new(runtime: RuntimeHandle, config: SwipeConfig, handler: Rc<dyn SwipeHandler>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("{err}; using default swipe config");
                SwipeConfig::default()
            }
        };
        Self::build(runtime, config, handler)
    }

    pub fn try_new(
        runtime: RuntimeHandle,
        config: SwipeConfig,
        handler: Rc<dyn SwipeHandler>,
    ) -> Result<Self, SwipeError> {
        config.validate()?;
        Ok(Self::build(runtime, config, handler))
    }

    fn build(runtime: RuntimeHandle, config: SwipeConfig, handler: Rc<dyn SwipeHandler>) -> Self {
        Self {
            inner: Rc::new(RefCell::new(ControllerInner {
                handler,
                state: SwipeState::Idle,
                sample: GestureSample::ZERO,
                revealed: false,
                pending: None,
            })),
            config: Rc::new(Cell::new(config)),
            position: Animatable::new(Offset::ZERO, runtime),
        }
    }

    /// Pointer went down on the card.
    ///
    /// Restarts the sample when already tracking; rejected while resolving.
    /// A detail sheet still open from the previous gesture is reported closed.
    pub fn begin_gesture(&self) -> Result<(), SwipeError> {
        let concealed = {
            let mut inner = self.inner.borrow_mut();
            if inner.state == SwipeState::Resolving {
                return Err(misuse("begin_gesture", inner.state));
            }
            inner.state = SwipeState::Tracking;
            inner.sample = GestureSample::ZERO;
            std::mem::take(&mut inner.revealed).then(|| Rc::clone(&inner.handler))
        };
        log::trace!("swipe gesture started");
        if let Some(handler) = concealed {
            handler.on_reveal_detail(false);
        }
        Ok(())
    }

    /// Pointer moved; `dx`/`dy` are cumulative since the gesture started.
    pub fn update_gesture(&self, dx: f32, dy: f32) -> Result<(), SwipeError> {
        self.apply_update(Offset::new(dx, dy), None)
    }

    /// Like [`Self::update_gesture`], also recording the pointer velocity in px/s.
    pub fn update_gesture_with_velocity(
        &self,
        dx: f32,
        dy: f32,
        velocity: Offset,
    ) -> Result<(), SwipeError> {
        self.apply_update(Offset::new(dx, dy), Some(velocity))
    }

    fn apply_update(&self, translation: Offset, velocity: Option<Offset>) -> Result<(), SwipeError> {
        let config = self.config.get();
        let (handler, reveal_changed) = {
            let mut inner = self.inner.borrow_mut();
            if inner.state != SwipeState::Tracking {
                return Err(misuse("update_gesture", inner.state));
            }
            if !translation.is_finite() || velocity.is_some_and(|v| !v.is_finite()) {
                log::debug!("ignoring non-finite gesture update {translation:?}");
                return Err(SwipeError::NonFiniteInput);
            }

            inner.sample.translation = translation;
            // A plain update carries no velocity, so an earlier one is stale.
            inner.sample.velocity = velocity;

            let revealed = translation.y.abs() > config.reveal_threshold
                && translation.y.abs() > translation.x.abs();
            let changed = revealed != inner.revealed;
            inner.revealed = revealed;
            (Rc::clone(&inner.handler), changed.then_some(revealed))
        };

        self.position.snap_to(translation);
        if let Some(revealed) = reveal_changed {
            handler.on_reveal_detail(revealed);
        }
        Ok(())
    }

    /// Pointer released: decides the outcome and starts the resolve animation.
    ///
    /// The returned outcome is final; its callback fires when the card
    /// reaches its resting point.
    pub fn end_gesture(&self) -> Result<SwipeOutcome, SwipeError> {
        let outcome = {
            let inner = self.inner.borrow();
            if inner.state != SwipeState::Tracking {
                return Err(misuse("end_gesture", inner.state));
            }
            resolve_outcome(&self.config.get(), &inner.sample)
        };
        self.start_resolve(outcome);
        Ok(outcome)
    }

    /// Pointer cancelled by the platform: the card springs back regardless of
    /// how far it travelled.
    pub fn cancel_gesture(&self) -> Result<(), SwipeError> {
        let state = self.state();
        if state != SwipeState::Tracking {
            return Err(misuse("cancel_gesture", state));
        }
        self.start_resolve(SwipeOutcome::Reset);
        Ok(())
    }

    /// Commits the card without a drag, e.g. from a like/pass button.
    pub fn force_swipe(&self, direction: SwipeDirection) -> Result<(), SwipeError> {
        let state = self.state();
        if state != SwipeState::Idle {
            return Err(misuse("force_swipe", state));
        }
        self.start_resolve(SwipeOutcome::Commit(direction));
        Ok(())
    }

    /// Abandons whatever is in progress without reporting an outcome.
    pub fn cancel(&self) {
        let was = {
            let mut inner = self.inner.borrow_mut();
            let was = inner.state;
            inner.state = SwipeState::Idle;
            inner.pending = None;
            inner.sample = GestureSample::ZERO;
            was
        };
        self.position.stop();
        if was != SwipeState::Idle {
            log::debug!("swipe cancelled while {was}");
        }
    }

    /// Cancels and puts the card back at its origin, ready for the next card.
    pub fn recycle(&self) {
        self.cancel();
        self.inner.borrow_mut().revealed = false;
        self.position.snap_to(Offset::ZERO);
    }

    fn start_resolve(&self, outcome: SwipeOutcome) {
        let config = self.config.get();
        {
            let mut inner = self.inner.borrow_mut();
            inner.state = SwipeState::Resolving;
            inner.pending = Some(outcome);
        }
        log::debug!("swipe resolving to {outcome:?}");

        let (target, animation) = match outcome {
            SwipeOutcome::Commit(direction) => (
                config.exit_target(direction),
                AnimationType::Tween(config.commit_animation),
            ),
            SwipeOutcome::Reset => (Offset::ZERO, config.reset_animation),
        };
        let weak = Rc::downgrade(&self.inner);
        self.position
            .animate_to(target, animation, move || Self::finish_resolve(weak));
    }

    fn finish_resolve(weak: Weak<RefCell<ControllerInner>>) {
        let Some(inner) = weak.upgrade() else {
            return;
        };
        let (handler, outcome) = {
            let mut inner = inner.borrow_mut();
            if inner.state != SwipeState::Resolving {
                return;
            }
            let Some(outcome) = inner.pending.take() else {
                return;
            };
            inner.state = SwipeState::Idle;
            inner.sample = GestureSample::ZERO;
            (Rc::clone(&inner.handler), outcome)
        };
        log::debug!("swipe resolved: {outcome:?}");
        dispatch_outcome(handler.as_ref(), outcome);
    }

    pub fn state(&self) -> SwipeState {
        self.inner.borrow().state
    }

    pub fn is_idle(&self) -> bool {
        self.state() == SwipeState::Idle
    }

    /// Outcome being animated, while resolving.
    pub fn pending_outcome(&self) -> Option<SwipeOutcome> {
        self.inner.borrow().pending
    }

    pub fn sample(&self) -> GestureSample {
        self.inner.borrow().sample
    }

    pub fn is_detail_revealed(&self) -> bool {
        self.inner.borrow().revealed
    }

    pub fn position(&self) -> CardPosition {
        let offset = self.position.value();
        CardPosition {
            offset,
            rotation_degrees: self.config.get().rotation_for(offset.x),
        }
    }

    /// Signed horizontal progress toward the commit threshold in `[-1, 1]`,
    /// for like/pass overlays.
    pub fn commit_progress(&self) -> f32 {
        let config = self.config.get();
        let threshold = config.horizontal_threshold_px();
        if threshold <= 0.0 {
            return 0.0;
        }
        (self.position.value().x / threshold).clamp(-1.0, 1.0)
    }

    pub fn config(&self) -> SwipeConfig {
        self.config.get()
    }

    /// Replaces the configuration, e.g. after a viewport resize. Takes effect
    /// for the next decision and animation.
    pub fn set_config(&self, config: SwipeConfig) -> Result<(), SwipeError> {
        config.validate()?;
        self.config.set(config);
        Ok(())
    }

    /// Observer for every position change, from drags and animation frames.
    pub fn set_on_position_changed(&self, on_change: impl Fn(CardPosition) + 'static) {
        let config = Rc::clone(&self.config);
        self.position.set_on_update(move |offset| {
            on_change(CardPosition {
                offset: *offset,
                rotation_degrees: config.get().rotation_for(offset.x),
            })
        });
    }

    pub fn set_handler(&self, handler: Rc<dyn SwipeHandler>) {
        let previous = std::mem::replace(&mut self.inner.borrow_mut().handler, handler);
        drop(previous);
    }
}

impl std::fmt::Debug for SwipeGestureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SwipeGestureController")
            .field("state", &inner.state)
            .field("sample", &inner.sample)
            .field("pending", &inner.pending)
            .field("position", &self.position.value())
            .finish()
    }
}

fn misuse(operation: &'static str, state: SwipeState) -> SwipeError {
    log::debug!("{operation} ignored while {state}");
    SwipeError::InvalidState { operation, state }
}

/// Decides how a released gesture resolves.
///
/// Horizontal displacement wins, then an upward drag (when enabled), then
/// release velocity (when enabled); anything else resets.
pub fn resolve_outcome(config: &SwipeConfig, sample: &GestureSample) -> SwipeOutcome {
    let translation = sample.translation;

    if translation.x.abs() >= config.horizontal_threshold_px() {
        return SwipeOutcome::Commit(SwipeDirection::horizontal(translation.x));
    }

    if let Some(up_threshold) = config.up_threshold_px() {
        if -translation.y >= up_threshold && translation.y.abs() > translation.x.abs() {
            return SwipeOutcome::UP;
        }
    }

    if let (Some(threshold), Some(velocity)) = (config.velocity_threshold, sample.velocity) {
        let upward_fling = config.up_swipe_threshold.is_some()
            && -velocity.y >= threshold
            && velocity.y.abs() > velocity.x.abs();
        if upward_fling {
            return SwipeOutcome::UP;
        }
        if velocity.x.abs() >= threshold {
            return SwipeOutcome::Commit(SwipeDirection::horizontal(velocity.x));
        }
    }

    SwipeOutcome::Reset
}
