use std::fmt;

use super::SwipeState;

/// Failures reported by the swipe components.
///
/// None of these are fatal: a rejected call leaves the controller exactly as
/// it was, so hosts may log and carry on.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeError {
    /// The operation is not valid in the controller's current state.
    InvalidState {
        operation: &'static str,
        state: SwipeState,
    },
    /// A configuration value is out of range.
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
    /// A gesture update carried NaN or infinite coordinates.
    NonFiniteInput,
    /// `rewind` was called with no committed card to bring back.
    NothingToRewind,
    /// The deck has no card left to swipe.
    DeckExhausted,
}

impl fmt::Display for SwipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwipeError::InvalidState { operation, state } => {
                write!(f, "{operation} is not valid while {state}")
            }
            SwipeError::InvalidConfig { field, reason } => {
                write!(f, "invalid swipe config: {field} {reason}")
            }
            SwipeError::NonFiniteInput => write!(f, "gesture input is not finite"),
            SwipeError::NothingToRewind => write!(f, "no committed card to rewind"),
            SwipeError::DeckExhausted => write!(f, "no cards left in the deck"),
        }
    }
}

impl std::error::Error for SwipeError {}
