use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_core::{Runtime, FRAME_INTERVAL_NANOS};

use crate::swipe::{SwipeConfig, SwipeGestureController, SwipeHandler};


#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Event {
    Left,
    Right,
    SuperLike,
    Reset,
    Reveal(bool),
}

#[derive(Default)]
pub(crate) struct Recorder {
    events: RefCell<Vec<Event>>,
}

impl Recorder {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    /// Outcome callbacks only, without reveal toggles.
    pub(crate) fn outcomes(&self) -> Vec<Event> {
        self.events
            .borrow()
            .iter()
            .copied()
            .filter(|event| !matches!(event, Event::Reveal(_)))
            .collect()
    }
}

impl SwipeHandler for Recorder {
    fn on_swipe_left(&self) {
        self.events.borrow_mut().push(Event::Left);
    }

    fn on_swipe_right(&self) {
        self.events.borrow_mut().push(Event::Right);
    }

    fn on_super_like(&self) {
        self.events.borrow_mut().push(Event::SuperLike);
    }

    fn on_swipe_reset(&self) {
        self.events.borrow_mut().push(Event::Reset);
    }

    fn on_reveal_detail(&self, revealed: bool) {
        self.events.borrow_mut().push(Event::Reveal(revealed));
    }
}

/// Headless runtime with a hand-advanced frame clock.
pub(crate) struct Frames {
    pub(crate) runtime: Runtime,
    time: u64,
}

impl Frames {
    pub(crate) fn new() -> Self {
        Self {
            runtime: Runtime::headless(),
            time: 0,
        }
    }

    pub(crate) fn controller(
        &self,
        config: SwipeConfig,
        recorder: &Rc<Recorder>,
    ) -> SwipeGestureController {
        SwipeGestureController::new(self.runtime.handle(), config, recorder.clone())
    }

    pub(crate) fn pump(&mut self, frames: usize) {
        for _ in 0..frames {
            if !self.runtime.has_frame_callbacks() {
                break;
            }
            self.time += FRAME_INTERVAL_NANOS;
            self.runtime.drain_frame_callbacks(self.time);
        }
    }

    /// Runs frames until no animation is pending.
    pub(crate) fn settle(&mut self) {
        self.pump(2_000);
        assert!(
            !self.runtime.has_frame_callbacks(),
            "animations did not settle"
        );
    }
}
