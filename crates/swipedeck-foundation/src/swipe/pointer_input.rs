//! Raw pointer events to controller calls.

use swipedeck_core::Offset;

use super::{SwipeError, SwipeGestureController, SwipeState};
use crate::velocity_tracker::VelocityTracker;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer sample as delivered by the platform, in window coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub position: Offset,
    /// Milliseconds on a monotonic clock.
    pub uptime_ms: i64,
}

impl PointerEvent {
    pub fn new(id: PointerId, kind: PointerEventKind, position: Offset, uptime_ms: i64) -> Self {
        Self {
            id,
            kind,
            position,
            uptime_ms,
        }
    }

    pub fn down(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Down, Offset::new(x, y), uptime_ms)
    }

    pub fn moved(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Move, Offset::new(x, y), uptime_ms)
    }

    pub fn up(id: PointerId, x: f32, y: f32, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Up, Offset::new(x, y), uptime_ms)
    }

    pub fn cancel(id: PointerId, uptime_ms: i64) -> Self {
        Self::new(id, PointerEventKind::Cancel, Offset::ZERO, uptime_ms)
    }
}

/// Feeds a [`SwipeGestureController`] from platform pointer events.
///
/// The first pointer to go down owns the gesture; other pointers are ignored
/// until it is released. Translation is measured from the down position and
/// velocity comes from a [`VelocityTracker`]. Controller rejections are logged
/// and swallowed so a malformed event stream never reaches the host's input
/// loop as an error.
#[derive(Debug)]
pub struct SwipePointerInput {
    controller: SwipeGestureController,
    active_pointer: Option<PointerId>,
    origin: Offset,
    tracker: VelocityTracker,
}

impl SwipePointerInput {
    pub fn new(controller: SwipeGestureController) -> Self {
        Self {
            controller,
            active_pointer: None,
            origin: Offset::ZERO,
            tracker: VelocityTracker::new(),
        }
    }

    pub fn controller(&self) -> &SwipeGestureController {
        &self.controller
    }

    pub fn is_tracking(&self) -> bool {
        self.active_pointer.is_some()
    }

    /// Handles one event; returns whether it was consumed.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        match event.kind {
            PointerEventKind::Down => {
                if self.active_pointer.is_some() {
                    return false;
                }
                if !accepted(self.controller.begin_gesture()) {
                    return false;
                }
                self.active_pointer = Some(event.id);
                self.origin = event.position;
                self.tracker.reset();
                self.tracker.add_position(event.uptime_ms, Offset::ZERO);
                true
            }
            PointerEventKind::Move => {
                if self.active_pointer != Some(event.id) {
                    return false;
                }
                if self.controller.state() != SwipeState::Tracking {
                    // Controller was cancelled or recycled under us.
                    self.release();
                    return false;
                }
                let translation = event.position - self.origin;
                self.tracker.add_position(event.uptime_ms, translation);
                let velocity = self
                    .tracker
                    .calculate_velocity_with_max(self.controller.config().max_fling_velocity);
                accepted(self.controller.update_gesture_with_velocity(
                    translation.x,
                    translation.y,
                    velocity,
                ))
            }
            PointerEventKind::Up => {
                if self.active_pointer != Some(event.id) {
                    return false;
                }
                // The release sample refreshes velocity, so a drag that paused
                // before lifting does not fling.
                let translation = event.position - self.origin;
                self.tracker.add_position(event.uptime_ms, translation);
                let velocity = self
                    .tracker
                    .calculate_velocity_with_max(self.controller.config().max_fling_velocity);
                // A bad release position still ends the gesture with the last good sample.
                accepted(self.controller.update_gesture_with_velocity(
                    translation.x,
                    translation.y,
                    velocity,
                ));
                let consumed = accepted(self.controller.end_gesture().map(|_| ()));
                self.release();
                consumed
            }
            PointerEventKind::Cancel => {
                if self.active_pointer != Some(event.id) {
                    return false;
                }
                let consumed = accepted(self.controller.cancel_gesture());
                self.release();
                consumed
            }
        }
    }

    /// Forgets the active pointer without touching the controller.
    pub fn release(&mut self) {
        self.active_pointer = None;
        self.origin = Offset::ZERO;
        self.tracker.reset();
    }
}

fn accepted(result: Result<(), SwipeError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::debug!("pointer event dropped: {err}");
            false
        }
    }
}
