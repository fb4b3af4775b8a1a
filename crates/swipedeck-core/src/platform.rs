//! Hooks into the host: frame requests and a time source.

use web_time::{Duration, Instant};

/// Asks the host for another frame.
///
/// Usually forwards to the window's redraw request (`Window::request_redraw`,
/// `requestAnimationFrame`, ...).
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Frame timestamps and pointer uptime measured from the clock's creation.
///
/// Backed by `web_time` so the same code runs natively and on wasm32.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }

    /// For [`crate::RuntimeHandle::drain_frame_callbacks`].
    pub fn frame_time_nanos(&self) -> u64 {
        u64::try_from(self.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }

    /// For pointer event timestamps.
    pub fn uptime_millis(&self) -> i64 {
        i64::try_from(self.elapsed().as_millis()).unwrap_or(i64::MAX)
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}
