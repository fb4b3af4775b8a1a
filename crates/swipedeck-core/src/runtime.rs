use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;
use crate::FrameCallbackId;

type FrameCallback = Box<dyn FnOnce(u64)>;

/// Callbacks waiting for the next frame, in registration order.
#[derive(Default)]
struct FrameQueue {
    pending: VecDeque<(FrameCallbackId, FrameCallback)>,
    next_id: FrameCallbackId,
}

impl FrameQueue {
    fn push(&mut self, callback: FrameCallback) -> FrameCallbackId {
        self.next_id += 1;
        self.pending.push_back((self.next_id, callback));
        self.next_id
    }

    fn remove(&mut self, id: FrameCallbackId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(queued, _)| *queued != id);
        self.pending.len() != before
    }
}

struct RuntimeState {
    scheduler: Arc<dyn RuntimeScheduler>,
    queue: RefCell<FrameQueue>,
    frame_requested: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
}

impl RuntimeState {
    fn enqueue(&self, callback: FrameCallback) -> FrameCallbackId {
        let id = self.queue.borrow_mut().push(callback);
        self.frame_requested.set(true);
        self.scheduler.schedule_frame();
        id
    }

    fn cancel(&self, id: FrameCallbackId) {
        let mut queue = self.queue.borrow_mut();
        if queue.remove(id) && queue.pending.is_empty() {
            self.frame_requested.set(false);
        }
    }

    fn is_waiting(&self) -> bool {
        !self.queue.borrow().pending.is_empty()
    }

    fn run_frame(&self, frame_time_nanos: u64) {
        if let Some(previous) = self.last_frame_nanos.replace(Some(frame_time_nanos)) {
            if frame_time_nanos < previous {
                log::trace!("frame time moved backwards: {frame_time_nanos} after {previous}");
            }
        }

        // Taken as a batch so callbacks can register for the next frame.
        let due = std::mem::take(&mut self.queue.borrow_mut().pending);
        for (_, callback) in due {
            callback(frame_time_nanos);
        }
        self.frame_requested.set(self.is_waiting());
    }
}

/// Owner of the frame callback queue.
///
/// Interaction components only ever see a [`RuntimeHandle`]; once the
/// `Runtime` is dropped every handle turns into a no-op.
#[derive(Clone)]
pub struct Runtime {
    state: Rc<RuntimeState>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            state: Rc::new(RuntimeState {
                scheduler,
                queue: RefCell::new(FrameQueue::default()),
                frame_requested: Cell::new(false),
                last_frame_nanos: Cell::new(None),
            }),
        }
    }

    /// Runtime whose scheduler ignores frame requests. Hosts that render
    /// continuously, and tests, pump frames themselves.
    pub fn headless() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            state: Rc::downgrade(&self.state),
        }
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }

    /// Whether a callback asked for a frame that has not been drained yet.
    pub fn needs_frame(&self) -> bool {
        self.state.frame_requested.get()
    }

    /// Runs every callback queued before this call with `frame_time_nanos`.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.state.run_frame(frame_time_nanos);
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.state.is_waiting()
    }
}

impl fmt::Debug for Runtime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("needs_frame", &self.needs_frame())
            .field("pending", &self.state.queue.borrow().pending.len())
            .finish()
    }
}

/// Scheduler for hosts that poll: frame requests are dropped.
#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

/// Non-owning access to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    state: Weak<RuntimeState>,
}

impl RuntimeHandle {
    /// Queues `callback` for the next drained frame. Returns `None` when the
    /// runtime is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let state = self.state.upgrade()?;
        Some(state.enqueue(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(state) = self.state.upgrade() {
            state.cancel(id);
        }
    }

    /// Runs every callback registered before this call. Callbacks registered
    /// while draining run on the following frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(state) = self.state.upgrade() {
            state.run_frame(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.state.upgrade().is_some_and(|state| state.is_waiting())
    }

    pub fn needs_frame(&self) -> bool {
        self.state
            .upgrade()
            .is_some_and(|state| state.frame_requested.get())
    }

    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }
}

impl fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
