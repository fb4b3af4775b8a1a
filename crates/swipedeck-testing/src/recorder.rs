use std::cell::RefCell;
use std::rc::Rc;

use swipedeck_foundation::{SwipeDirection, SwipeHandler, SwipeOutcome};

/// One outbound callback, in the order it was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordedEvent {
    SwipeLeft,
    SwipeRight,
    SuperLike,
    Reset,
    RevealDetail(bool),
}

impl RecordedEvent {
    /// The outcome this callback reports, if it is an outcome callback.
    pub fn outcome(&self) -> Option<SwipeOutcome> {
        match self {
            RecordedEvent::SwipeLeft => Some(SwipeOutcome::Commit(SwipeDirection::Left)),
            RecordedEvent::SwipeRight => Some(SwipeOutcome::Commit(SwipeDirection::Right)),
            RecordedEvent::SuperLike => Some(SwipeOutcome::Commit(SwipeDirection::Up)),
            RecordedEvent::Reset => Some(SwipeOutcome::Reset),
            RecordedEvent::RevealDetail(_) => None,
        }
    }
}

/// [`SwipeHandler`] that records every callback for later assertions.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    events: RefCell<Vec<RecordedEvent>>,
}

impl OutcomeRecorder {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.borrow().clone()
    }

    /// Outcome callbacks only, in delivery order.
    pub fn outcomes(&self) -> Vec<SwipeOutcome> {
        self.events
            .borrow()
            .iter()
            .filter_map(RecordedEvent::outcome)
            .collect()
    }

    pub fn last_outcome(&self) -> Option<SwipeOutcome> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(RecordedEvent::outcome)
    }

    pub fn count(&self, event: RecordedEvent) -> usize {
        self.events
            .borrow()
            .iter()
            .filter(|recorded| **recorded == event)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }

    fn record(&self, event: RecordedEvent) {
        log::trace!("recorded {event:?}");
        self.events.borrow_mut().push(event);
    }
}

impl SwipeHandler for OutcomeRecorder {
    fn on_swipe_left(&self) {
        self.record(RecordedEvent::SwipeLeft);
    }

    fn on_swipe_right(&self) {
        self.record(RecordedEvent::SwipeRight);
    }

    fn on_super_like(&self) {
        self.record(RecordedEvent::SuperLike);
    }

    fn on_swipe_reset(&self) {
        self.record(RecordedEvent::Reset);
    }

    fn on_reveal_detail(&self, revealed: bool) {
        self.record(RecordedEvent::RevealDetail(revealed));
    }
}
