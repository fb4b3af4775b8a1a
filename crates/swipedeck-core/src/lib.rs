//! Core runtime for SwipeDeck: frame callbacks, clocks and geometry.
//!
//! Everything here is single-threaded. The host owns a [`Runtime`], hands
//! [`RuntimeHandle`]s to interaction components and pumps
//! [`RuntimeHandle::drain_frame_callbacks`] once per rendered frame.

pub mod frame_clock;
pub mod geometry;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use geometry::{Offset, Size};
pub use platform::{MonotonicClock, RuntimeScheduler};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle};

pub type FrameCallbackId = u64;

/// Nanoseconds between frames at 60 Hz.
pub const FRAME_INTERVAL_NANOS: u64 = 16_666_667;

pub mod prelude {
    pub use crate::frame_clock::{FrameCallbackRegistration, FrameClock};
    pub use crate::geometry::{Offset, Size};
    pub use crate::platform::{MonotonicClock, RuntimeScheduler};
    pub use crate::runtime::{DefaultScheduler, Runtime, RuntimeHandle};
}

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
