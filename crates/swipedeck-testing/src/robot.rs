//! Robot-style driver for swipe interactions.
//!
//! A [`SwipeRobot`] owns a headless [`Runtime`] and a fake clock. It sends
//! pointer events to anything implementing [`PointerTarget`] and pumps frames
//! deterministically, so tests can script drags and flings and then assert on
//! what the card and its handler saw.
//!
//! # Example
//!
//! ```
//! use swipedeck_foundation::{SwipeConfig, SwipeDeck};
//! use swipedeck_testing::SwipeRobot;
//!
//! let mut robot = SwipeRobot::new();
//! let mut deck = SwipeDeck::new(robot.runtime_handle(), SwipeConfig::default(), vec!["a", "b"]);
//!
//! robot.drag(&mut deck, (200.0, 400.0), (380.0, 400.0));
//! robot.wait_for_idle();
//!
//! assert_eq!(deck.active(), Some(&"b"));
//! ```

use swipedeck_core::{Offset, Runtime, RuntimeHandle, FRAME_INTERVAL_NANOS};
use swipedeck_foundation::{PointerEvent, PointerId, SwipeDeck, SwipePointerInput};

/// Frames pumped by [`SwipeRobot::wait_for_idle`] before giving up.
const MAX_IDLE_FRAMES: usize = 10_000;

/// Milliseconds between pointer samples in scripted gestures.
const MOVE_INTERVAL_MS: i64 = 8;

/// Receiver of scripted pointer events.
pub trait PointerTarget {
    /// Delivers one event; returns whether it was consumed.
    fn dispatch(&mut self, event: &PointerEvent) -> bool;
}

impl PointerTarget for SwipePointerInput {
    fn dispatch(&mut self, event: &PointerEvent) -> bool {
        self.on_pointer_event(event)
    }
}

impl<T> PointerTarget for SwipeDeck<T> {
    fn dispatch(&mut self, event: &PointerEvent) -> bool {
        self.pointer_event(event)
    }
}

/// Drives gestures and frames against a headless runtime.
pub struct SwipeRobot {
    runtime: Runtime,
    frame_time_nanos: u64,
    uptime_ms: i64,
    next_pointer: PointerId,
}

impl SwipeRobot {
    pub fn new() -> Self {
        Self {
            runtime: Runtime::headless(),
            frame_time_nanos: 0,
            uptime_ms: 0,
            next_pointer: 1,
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    /// Pointer clock in milliseconds.
    pub fn uptime_ms(&self) -> i64 {
        self.uptime_ms
    }

    /// Whether an animation is waiting for a frame.
    pub fn is_animating(&self) -> bool {
        self.runtime.has_frame_callbacks()
    }

    /// Runs one frame, 16.67 ms after the previous one.
    pub fn advance_frame(&mut self) {
        self.frame_time_nanos += FRAME_INTERVAL_NANOS;
        // Pointer time never runs backwards behind scripted moves.
        self.uptime_ms = self
            .uptime_ms
            .max((self.frame_time_nanos / 1_000_000) as i64);
        self.runtime.drain_frame_callbacks(self.frame_time_nanos);
    }

    pub fn advance_frames(&mut self, count: usize) {
        for _ in 0..count {
            self.advance_frame();
        }
    }

    /// Advances time by at least `millis`, running every frame in between.
    pub fn advance_time(&mut self, millis: u64) {
        let frames = (millis * 1_000_000).div_ceil(FRAME_INTERVAL_NANOS);
        self.advance_frames(frames as usize);
    }

    /// Pumps frames until no animation is pending. Returns the number of
    /// frames it took.
    ///
    /// Panics if animations are still running after a generous frame budget,
    /// which in a test means something keeps rescheduling itself.
    pub fn wait_for_idle(&mut self) -> usize {
        let mut frames = 0;
        while self.runtime.has_frame_callbacks() {
            assert!(
                frames < MAX_IDLE_FRAMES,
                "animations still running after {MAX_IDLE_FRAMES} frames"
            );
            self.advance_frame();
            frames += 1;
        }
        log::trace!("idle after {frames} frames");
        frames
    }

    /// Pointer down at `position`. Returns the id to use for the rest of the
    /// gesture.
    pub fn press(&mut self, target: &mut impl PointerTarget, position: (f32, f32)) -> PointerId {
        let id = self.next_pointer;
        self.next_pointer += 1;
        target.dispatch(&PointerEvent::down(id, position.0, position.1, self.uptime_ms));
        id
    }

    pub fn move_to(
        &mut self,
        target: &mut impl PointerTarget,
        id: PointerId,
        position: (f32, f32),
    ) -> bool {
        self.uptime_ms += MOVE_INTERVAL_MS;
        target.dispatch(&PointerEvent::moved(id, position.0, position.1, self.uptime_ms))
    }

    pub fn release(
        &mut self,
        target: &mut impl PointerTarget,
        id: PointerId,
        position: (f32, f32),
    ) -> bool {
        target.dispatch(&PointerEvent::up(id, position.0, position.1, self.uptime_ms))
    }

    pub fn cancel(&mut self, target: &mut impl PointerTarget, id: PointerId) -> bool {
        target.dispatch(&PointerEvent::cancel(id, self.uptime_ms))
    }

    /// Slow drag: moves in ten steps, holds still, then releases, so the
    /// release carries no fling velocity.
    pub fn drag(&mut self, target: &mut impl PointerTarget, from: (f32, f32), to: (f32, f32)) {
        let id = self.press(target, from);
        self.move_in_steps(target, id, from, to, 10);
        self.uptime_ms += 200;
        self.release(target, id, to);
    }

    /// Fast flick released while still moving.
    pub fn fling(&mut self, target: &mut impl PointerTarget, from: (f32, f32), to: (f32, f32)) {
        let id = self.press(target, from);
        self.move_in_steps(target, id, from, to, 4);
        self.release(target, id, to);
    }

    /// Drags by `delta` and keeps the pointer down. Returns the pointer id.
    pub fn drag_and_hold(
        &mut self,
        target: &mut impl PointerTarget,
        from: (f32, f32),
        delta: Offset,
    ) -> PointerId {
        let id = self.press(target, from);
        let to = (from.0 + delta.x, from.1 + delta.y);
        self.move_in_steps(target, id, from, to, 10);
        id
    }

    fn move_in_steps(
        &mut self,
        target: &mut impl PointerTarget,
        id: PointerId,
        from: (f32, f32),
        to: (f32, f32),
        steps: usize,
    ) {
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            self.move_to(target, id, (x, y));
        }
    }
}

impl Default for SwipeRobot {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SwipeRobot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeRobot")
            .field("frame_time_nanos", &self.frame_time_nanos)
            .field("uptime_ms", &self.uptime_ms)
            .field("animating", &self.is_animating())
            .finish()
    }
}
