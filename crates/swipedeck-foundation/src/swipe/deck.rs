//! A stack of swipeable cards with a single active card on top.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_core::RuntimeHandle;

use super::{
    NoopSwipeHandler, PointerEvent, SwipeConfig, SwipeDirection, SwipeError, SwipeGestureController,
    SwipeHandler, SwipePointerInput,
};
use crate::gesture_constants::{MIN_STACK_SCALE, STACK_SCALE_STEP};

/// A committed card: its index in the deck and where it went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckDecision {
    pub index: usize,
    pub direction: SwipeDirection,
}

/// Cards visible at once, top first. Stacks rarely draw more than a few.
pub type VisibleCards<'a, T> = SmallVec<[&'a T; 4]>;

struct DeckState {
    top: Cell<usize>,
    len: Cell<usize>,
    decisions: RefCell<Vec<DeckDecision>>,
    history: RefCell<Vec<DeckDecision>>,
    listener: RefCell<Rc<dyn SwipeHandler>>,
}

/// Installed on the deck's controller; advances the stack on commits and
/// forwards every callback to the host's listener.
struct DeckHandler {
    state: Rc<DeckState>,
    controller: SwipeGestureController,
}

impl DeckHandler {
    fn commit(&self, direction: SwipeDirection) {
        let index = self.state.top.get();
        let decision = DeckDecision { index, direction };
        self.state.decisions.borrow_mut().push(decision);
        self.state.history.borrow_mut().push(decision);
        self.state.top.set(index + 1);
        self.controller.recycle();
        log::debug!("card {index} committed {direction:?}");
    }

    fn listener(&self) -> Rc<dyn SwipeHandler> {
        Rc::clone(&self.state.listener.borrow())
    }
}

impl SwipeHandler for DeckHandler {
    fn on_swipe_left(&self) {
        self.commit(SwipeDirection::Left);
        self.listener().on_swipe_left();
    }

    fn on_swipe_right(&self) {
        self.commit(SwipeDirection::Right);
        self.listener().on_swipe_right();
    }

    fn on_super_like(&self) {
        self.commit(SwipeDirection::Up);
        self.listener().on_super_like();
    }

    fn on_swipe_reset(&self) {
        self.listener().on_swipe_reset();
    }

    fn on_reveal_detail(&self, revealed: bool) {
        self.listener().on_reveal_detail(revealed);
    }
}

/// Host-side card stack.
///
/// Only the top card receives input; it is driven by one controller that is
/// recycled for the next card once a commit animation finishes. Decisions are
/// queued for the host to hand to whatever stores them.
pub struct SwipeDeck<T> {
    cards: Vec<T>,
    state: Rc<DeckState>,
    controller: SwipeGestureController,
    input: SwipePointerInput,
}

impl<T> SwipeDeck<T> {
    pub fn new(runtime: RuntimeHandle, config: SwipeConfig, cards: Vec<T>) -> Self {
        let state = Rc::new(DeckState {
            top: Cell::new(0),
            len: Cell::new(cards.len()),
            decisions: RefCell::new(Vec::new()),
            history: RefCell::new(Vec::new()),
            listener: RefCell::new(Rc::new(NoopSwipeHandler)),
        });
        let controller =
            SwipeGestureController::new(runtime, config, Rc::new(NoopSwipeHandler));
        controller.set_handler(Rc::new(DeckHandler {
            state: Rc::clone(&state),
            controller: controller.clone(),
        }));
        let input = SwipePointerInput::new(controller.clone());
        Self {
            cards,
            state,
            controller,
            input,
        }
    }

    /// Host callbacks, invoked after the deck has advanced.
    pub fn with_listener(self, listener: Rc<dyn SwipeHandler>) -> Self {
        self.set_listener(listener);
        self
    }

    pub fn set_listener(&self, listener: Rc<dyn SwipeHandler>) {
        *self.state.listener.borrow_mut() = listener;
    }

    /// Appends cards behind the existing ones, e.g. the next page of profiles.
    pub fn push_cards(&mut self, cards: impl IntoIterator<Item = T>) {
        self.cards.extend(cards);
        self.state.len.set(self.cards.len());
    }

    pub fn controller(&self) -> &SwipeGestureController {
        &self.controller
    }

    pub fn active_index(&self) -> Option<usize> {
        let top = self.state.top.get();
        (top < self.cards.len()).then_some(top)
    }

    pub fn active(&self) -> Option<&T> {
        self.active_index().and_then(|index| self.cards.get(index))
    }

    pub fn card(&self, index: usize) -> Option<&T> {
        self.cards.get(index)
    }

    /// Up to `count` cards from the top down.
    pub fn visible(&self, count: usize) -> VisibleCards<'_, T> {
        let top = self.state.top.get().min(self.cards.len());
        self.cards[top..].iter().take(count).collect()
    }

    pub fn remaining(&self) -> usize {
        self.state.len.get().saturating_sub(self.state.top.get())
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Routes a pointer event to the active card. Returns whether it was consumed.
    pub fn pointer_event(&mut self, event: &PointerEvent) -> bool {
        if self.is_empty() {
            if self.input.is_tracking() {
                self.input.release();
            }
            return false;
        }
        self.input.on_pointer_event(event)
    }

    /// Button-driven commit of the active card.
    pub fn swipe(&mut self, direction: SwipeDirection) -> Result<(), SwipeError> {
        if self.is_empty() {
            return Err(SwipeError::DeckExhausted);
        }
        self.controller.force_swipe(direction)
    }

    /// Drains decisions recorded since the last call, oldest first.
    pub fn take_decisions(&self) -> Vec<DeckDecision> {
        std::mem::take(&mut *self.state.decisions.borrow_mut())
    }

    /// Every commit that has not been rewound, oldest first.
    pub fn history(&self) -> Vec<DeckDecision> {
        self.state.history.borrow().clone()
    }

    /// Puts the most recently committed card back on top.
    ///
    /// Only possible while the active card is idle. The returned decision is
    /// the one being undone; it is also dropped from the undrained queue.
    pub fn rewind(&mut self) -> Result<DeckDecision, SwipeError> {
        if !self.controller.is_idle() {
            return Err(SwipeError::InvalidState {
                operation: "rewind",
                state: self.controller.state(),
            });
        }
        let decision = self
            .state
            .history
            .borrow_mut()
            .pop()
            .ok_or(SwipeError::NothingToRewind)?;
        {
            let mut queued = self.state.decisions.borrow_mut();
            if let Some(position) = queued.iter().rposition(|queued| *queued == decision) {
                queued.remove(position);
            }
        }
        self.state.top.set(decision.index);
        self.input.release();
        self.controller.recycle();
        log::debug!("card {} rewound", decision.index);
        Ok(decision)
    }

    /// Scale of the card `depth` positions below the top card at rest.
    pub fn behind_card_scale(depth: usize) -> f32 {
        (1.0 - STACK_SCALE_STEP * depth as f32).max(MIN_STACK_SCALE)
    }

    /// Scale of the card directly below the top, growing toward full size as
    /// the top card approaches its commit threshold.
    pub fn next_card_scale(&self) -> f32 {
        let resting = Self::behind_card_scale(1);
        let progress = self.controller.commit_progress().abs();
        resting + (1.0 - resting) * progress
    }
}

impl<T> Drop for SwipeDeck<T> {
    fn drop(&mut self) {
        // The installed DeckHandler owns a controller handle; swapping it out
        // releases the controller.
        self.controller.cancel();
        self.controller.set_handler(Rc::new(NoopSwipeHandler));
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SwipeDeck<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SwipeDeck")
            .field("active", &self.active())
            .field("remaining", &self.remaining())
            .field("controller", &self.controller)
            .finish()
    }
}
