//! Testing utilities and harness for SwipeDeck

pub mod recorder;
pub mod robot;

// Re-export testing utilities
pub use recorder::*;
pub use robot::*;

pub mod prelude {
    pub use crate::recorder::{OutcomeRecorder, RecordedEvent};
    pub use crate::robot::{PointerTarget, SwipeRobot};
}
