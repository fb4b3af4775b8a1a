//! A value that animates toward a target one frame at a time.
//!
//! Frames come from the [`RuntimeHandle`]'s frame clock. Each `animate_to`
//! starts a fresh run; the run's completion callback fires once when it
//! reaches its target and is dropped unrun if the run is replaced, stopped or
//! the last handle goes away.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use swipedeck_core::{FrameCallbackRegistration, Offset, RuntimeHandle};

use crate::spec::AnimationType;

/// Values an [`Animatable`] can move between.
pub trait Lerp {
    /// Point `fraction` of the way from `self` to `target`. Fractions outside
    /// `[0, 1]` extrapolate, which springs rely on to overshoot.
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * f64::from(fraction)
    }
}

impl Lerp for Offset {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        *self + (*target - *self) * fraction
    }
}

/// Springs that have not come to rest by now are snapped onto their target.
const MAX_SPRING_NANOS: u64 = 5_000_000_000;

type OnEnd = Box<dyn FnOnce()>;
type Observer<T> = Rc<dyn Fn(&T)>;

/// One `animate_to` call in flight.
struct Run<T> {
    id: u64,
    from: T,
    to: T,
    animation: AnimationType,
    /// 0.0 at `from`, 1.0 at `to`.
    progress: f32,
    /// Spring velocity in progress per second.
    velocity: f32,
    started_at: Option<u64>,
    last_frame: Option<u64>,
    frame: Option<FrameCallbackRegistration>,
    on_end: Option<OnEnd>,
}

impl<T> Run<T> {
    /// Moves `progress` to frame time `now`; true once the target is reached.
    fn advance(&mut self, now: u64) -> bool {
        match self.animation {
            AnimationType::Tween(spec) => {
                let started_at = *self.started_at.get_or_insert(now);
                let (progress, done) = spec.progress_at(now.saturating_sub(started_at));
                self.progress = progress;
                done
            }
            AnimationType::Spring(spec) => {
                let started_at = *self.started_at.get_or_insert(now);
                let previous = self.last_frame.replace(now).unwrap_or(now);
                let dt = now.saturating_sub(previous) as f32 / 1e9;
                // The first frame only anchors the clock.
                let settled = dt > 0.0 && spec.step(&mut self.progress, &mut self.velocity, dt);
                if !settled && now.saturating_sub(started_at) >= MAX_SPRING_NANOS {
                    log::debug!("spring {spec:?} still moving after 5 s, snapping to target");
                    return true;
                }
                settled
            }
        }
    }
}

struct AnimatableState<T> {
    runtime: RuntimeHandle,
    value: T,
    observer: Option<Observer<T>>,
    last_animation: AnimationType,
    runs_started: u64,
    run: Option<Run<T>>,
}

/// Shared handle to an animated value. Clones drive the same value.
pub struct Animatable<T: Lerp + Clone + 'static> {
    state: Rc<RefCell<AnimatableState<T>>>,
}

impl<T: Lerp + Clone + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnimatableState {
                runtime,
                value: initial,
                observer: None,
                last_animation: AnimationType::default(),
                runs_started: 0,
                run: None,
            })),
        }
    }

    /// Starts moving from the current value to `target` and calls `on_end`
    /// when it gets there. A run already in flight is abandoned where it
    /// stands.
    pub fn animate_to(
        &self,
        target: T,
        animation: impl Into<AnimationType>,
        on_end: impl FnOnce() + 'static,
    ) {
        let animation = animation.into();
        let abandoned = {
            let mut state = self.state.borrow_mut();
            state.last_animation = animation;
            state.runs_started += 1;
            let run = Run {
                id: state.runs_started,
                from: state.value.clone(),
                to: target,
                animation,
                progress: 0.0,
                velocity: 0.0,
                started_at: None,
                last_frame: None,
                frame: None,
                on_end: Some(Box::new(on_end)),
            };
            state.run.replace(run)
        };
        // The old closure may own a handle to this value.
        drop(abandoned);
        Self::request_frame(&self.state);
    }

    /// Freezes the value where it is. The pending `on_end` never runs.
    pub fn stop(&self) {
        let abandoned = self.state.borrow_mut().run.take();
        drop(abandoned);
    }

    /// Jumps to `value` without animating and tells the observer.
    pub fn snap_to(&self, value: T) {
        let (abandoned, observer) = {
            let mut state = self.state.borrow_mut();
            state.value = value.clone();
            (state.run.take(), state.observer.clone())
        };
        drop(abandoned);
        if let Some(observer) = observer {
            observer(&value);
        }
    }

    /// Called with every new value, from animation frames and from
    /// [`Animatable::snap_to`].
    pub fn set_on_update(&self, observer: impl Fn(&T) + 'static) {
        self.state.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn clear_on_update(&self) {
        self.state.borrow_mut().observer = None;
    }

    pub fn value(&self) -> T {
        self.state.borrow().value.clone()
    }

    /// Where the value is heading; the value itself when idle.
    pub fn target(&self) -> T {
        let state = self.state.borrow();
        match &state.run {
            Some(run) => run.to.clone(),
            None => state.value.clone(),
        }
    }

    /// The animation most recently passed to `animate_to`.
    pub fn animation_type(&self) -> AnimationType {
        self.state.borrow().last_animation
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().run.is_some()
    }

    fn request_frame(state: &Rc<RefCell<AnimatableState<T>>>) {
        let (clock, run_id) = {
            let current = state.borrow();
            match &current.run {
                Some(run) if run.frame.is_none() => (current.runtime.frame_clock(), run.id),
                _ => return,
            }
        };
        let weak = Rc::downgrade(state);
        let frame = clock.with_frame_nanos(move |now| {
            if let Some(state) = weak.upgrade() {
                Self::on_frame(&state, run_id, now);
            }
        });
        if !frame.is_active() {
            log::debug!("animation started after its runtime was dropped");
        }
        if let Some(run) = state.borrow_mut().run.as_mut() {
            run.frame = Some(frame);
        }
    }

    fn on_frame(state: &Rc<RefCell<AnimatableState<T>>>, run_id: u64, now: u64) {
        let (value, observer, finished, on_end) = {
            let mut current = state.borrow_mut();
            // A frame already drained for a run that has since been replaced.
            let Some(run) = current.run.as_mut().filter(|run| run.id == run_id) else {
                return;
            };
            run.frame = None;
            let finished = run.advance(now);
            let value = if finished {
                run.to.clone()
            } else {
                run.from.lerp(&run.to, run.progress)
            };
            current.value = value.clone();
            let on_end = if finished {
                current.run.take().and_then(|mut run| run.on_end.take())
            } else {
                None
            };
            (value, current.observer.clone(), finished, on_end)
        };

        if let Some(observer) = observer {
            observer(&value);
        }
        if let Some(on_end) = on_end {
            on_end();
        } else if !finished {
            Self::request_frame(state);
        }
    }
}

impl<T: Lerp + Clone + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<T: Lerp + Clone + fmt::Debug + 'static> fmt::Debug for Animatable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("Animatable")
            .field("value", &state.value)
            .field("target", &state.run.as_ref().map(|run| &run.to))
            .field("running", &state.run.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
