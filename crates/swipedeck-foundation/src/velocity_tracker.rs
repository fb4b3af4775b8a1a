//! Release-velocity estimation for swipe gestures.
//!
//! Impulse strategy: every segment between two samples adds the kinetic
//! energy it would give a unit mass, and the accumulated energy is turned
//! back into a velocity. Only samples from the tail of the gesture count, so
//! a drag that pauses before release reports no velocity.

use std::collections::VecDeque;

use smallvec::SmallVec;
use swipedeck_core::Offset;

/// Samples kept per axis.
const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest, are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between consecutive samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Velocity along one axis from absolute positions.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker1D {
    samples: VecDeque<Sample>,
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_SIZE),
        }
    }

    /// Records the position along this axis at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        if self.samples.len() == HISTORY_SIZE {
            self.samples.pop_front();
        }
        self.samples.push_back(Sample { time_ms, position });
    }

    /// Velocity in units per second; 0.0 until two recent samples exist.
    pub fn calculate_velocity(&self) -> f32 {
        let recent = self.recent_samples();
        if recent.len() < 2 {
            return 0.0;
        }
        impulse_velocity(&recent) * 1000.0
    }

    /// [`Self::calculate_velocity`] limited to `±max_velocity`. A cap that is
    /// not a positive finite number yields 0.0.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !(max_velocity.is_finite() && max_velocity > 0.0) {
            return 0.0;
        }
        match self.calculate_velocity() {
            velocity if velocity.is_nan() => 0.0,
            velocity => velocity.clamp(-max_velocity, max_velocity),
        }
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    /// The unbroken run of samples ending at the newest one, oldest first.
    fn recent_samples(&self) -> SmallVec<[Sample; HISTORY_SIZE]> {
        let mut recent = SmallVec::<[Sample; HISTORY_SIZE]>::new();
        let Some(newest) = self.samples.back().copied() else {
            return recent;
        };
        let mut later = newest.time_ms;
        for sample in self.samples.iter().rev() {
            let age = newest.time_ms - sample.time_ms;
            let gap = (later - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            later = sample.time_ms;
            recent.push(*sample);
        }
        recent.reverse();
        recent
    }
}

/// Units per millisecond over `samples`, oldest first.
fn impulse_velocity(samples: &[Sample]) -> f32 {
    let mut work = 0.0f32;
    let mut first = true;
    for pair in samples.windows(2) {
        let (older, newer) = (pair[0], pair[1]);
        if older.time_ms == newer.time_ms {
            continue;
        }
        let velocity = (newer.position - older.position) / (newer.time_ms - older.time_ms) as f32;
        work += (velocity - energy_to_velocity(work)) * velocity.abs();
        if first {
            // The first segment starts from rest.
            work *= 0.5;
            first = false;
        }
    }
    energy_to_velocity(work)
}

/// Inverts `E = v^2 / 2`, keeping the sign.
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}

/// Two-axis tracker fed with cumulative drag translations.
#[derive(Clone, Debug, Default)]
pub struct VelocityTracker {
    x: VelocityTracker1D,
    y: VelocityTracker1D,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, time_ms: i64, position: Offset) {
        self.x.add_data_point(time_ms, position.x);
        self.y.add_data_point(time_ms, position.y);
    }

    pub fn calculate_velocity(&self) -> Offset {
        Offset::new(self.x.calculate_velocity(), self.y.calculate_velocity())
    }

    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> Offset {
        Offset::new(
            self.x.calculate_velocity_with_max(max_velocity),
            self.y.calculate_velocity_with_max(max_velocity),
        )
    }

    pub fn reset(&mut self) {
        self.x.reset();
        self.y.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feeds `steps` samples moving `step_px` every `step_ms`, starting at 0.
    fn steady(step_ms: i64, step_px: f32, steps: i64) -> VelocityTracker1D {
        let mut tracker = VelocityTracker1D::new();
        for step in 0..=steps {
            tracker.add_data_point(step * step_ms, step as f32 * step_px);
        }
        tracker
    }

    #[test]
    fn needs_two_samples() {
        let mut tracker = VelocityTracker1D::new();
        assert_eq!(tracker.calculate_velocity(), 0.0);
        tracker.add_data_point(16, 240.0);
        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn steady_drag_reports_its_speed() {
        assert_eq!(steady(10, 100.0, 3).calculate_velocity(), 10_000.0);
        assert_eq!(steady(8, -12.0, 5).calculate_velocity(), -1_500.0);
    }

    #[test]
    fn history_is_bounded() {
        let tracker = steady(4, 2.0, 60);
        assert_eq!(tracker.samples.len(), HISTORY_SIZE);
        assert_eq!(tracker.calculate_velocity(), 500.0);
    }

    #[test]
    fn cap_applies_in_both_directions() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(8_000.0), -8_000.0);
    }

    #[test]
    fn unusable_cap_reports_zero() {
        let tracker = steady(10, 10.0, 2);
        assert_eq!(tracker.calculate_velocity_with_max(0.0), 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(-5.0), 0.0);
        assert_eq!(tracker.calculate_velocity_with_max(f32::INFINITY), 0.0);
    }

    #[test]
    fn only_the_recent_tail_counts() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(150, 100.0);
        tracker.add_data_point(160, 200.0);
        tracker.add_data_point(170, 300.0);

        assert_eq!(tracker.calculate_velocity(), 10_000.0);
    }

    #[test]
    fn pause_before_release_reports_zero() {
        let mut tracker = steady(8, 20.0, 5);
        tracker.add_data_point(40 + ASSUME_STOPPED_MS + 1, 100.0);

        assert_eq!(tracker.calculate_velocity(), 0.0);
    }

    #[test]
    fn repeated_timestamps_are_skipped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 50.0);
        tracker.add_data_point(20, 100.0);

        assert_eq!(tracker.calculate_velocity(), 5_000.0);
    }

    #[test]
    fn two_axis_tracker_reports_each_axis() {
        let mut tracker = VelocityTracker::new();
        tracker.add_position(0, Offset::ZERO);
        tracker.add_position(10, Offset::new(10.0, -5.0));
        tracker.add_position(20, Offset::new(20.0, -10.0));

        assert_eq!(tracker.calculate_velocity(), Offset::new(1_000.0, -500.0));
        assert_eq!(
            tracker.calculate_velocity_with_max(800.0),
            Offset::new(800.0, -500.0)
        );

        tracker.reset();
        assert_eq!(tracker.calculate_velocity(), Offset::ZERO);
    }
}
