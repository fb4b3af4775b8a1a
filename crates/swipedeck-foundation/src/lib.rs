//! Swipe-card gestures for SwipeDeck
//!
//! [`SwipeGestureController`] turns a drag into a like, pass or super like,
//! [`SwipePointerInput`] feeds it from raw pointer events and [`SwipeDeck`]
//! stacks cards on top of a single controller.

pub mod gesture_constants;
pub mod swipe;
pub mod velocity_tracker;

pub use swipe::*;
pub use velocity_tracker::{VelocityTracker, VelocityTracker1D};

pub mod prelude {
    pub use crate::swipe::{
        CardPosition, DeckDecision, PointerEvent, SwipeCallbacks, SwipeConfig, SwipeDeck,
        SwipeDirection, SwipeError, SwipeGestureController, SwipeHandler, SwipeOutcome,
        SwipePointerInput, SwipeState,
    };
}

#[cfg(test)]
mod tests;
