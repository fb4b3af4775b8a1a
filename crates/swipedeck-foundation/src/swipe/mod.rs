//! Swipe-card interaction: the gesture controller, its configuration, the
//! pointer adapter and the card deck built on top of them.

mod config;
mod controller;
mod deck;
mod error;
mod handler;
mod outcome;
mod pointer_input;

pub use config::SwipeConfig;
pub use controller::{resolve_outcome, SwipeGestureController};
pub use deck::{DeckDecision, SwipeDeck, VisibleCards};
pub use error::SwipeError;
pub use handler::{NoopSwipeHandler, SwipeCallbacks, SwipeHandler};
pub use outcome::{CardPosition, GestureSample, SwipeDirection, SwipeOutcome, SwipeState};
pub use pointer_input::{PointerEvent, PointerEventKind, PointerId, SwipePointerInput};
