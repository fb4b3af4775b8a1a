//! How an [`crate::Animatable`] travels: fixed-duration tweens or springs.

use crate::easing::Easing;

/// Fixed-duration animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    /// Time the value holds still before moving.
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub const DEFAULT_DURATION_MILLIS: u64 = 300;

    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }

    pub fn with_delay(self, delay_millis: u64) -> Self {
        Self {
            delay_millis,
            ..self
        }
    }

    pub fn total_millis(&self) -> u64 {
        self.delay_millis.saturating_add(self.duration_millis)
    }

    /// Eased progress `elapsed_nanos` after the animation started, and
    /// whether it is complete.
    pub(crate) fn progress_at(&self, elapsed_nanos: u64) -> (f32, bool) {
        let delay_nanos = self.delay_millis.saturating_mul(1_000_000);
        let Some(moving_nanos) = elapsed_nanos.checked_sub(delay_nanos) else {
            return (0.0, false);
        };
        if self.duration_millis == 0 {
            return (1.0, true);
        }
        let duration_nanos = self.duration_millis.saturating_mul(1_000_000);
        let fraction = (moving_nanos as f64 / duration_nanos as f64).min(1.0) as f32;
        (self.easing.transform(fraction), fraction >= 1.0)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(Self::DEFAULT_DURATION_MILLIS, Easing::FastOutSlowIn)
    }
}

/// Damped spring pulling the value onto its target.
///
/// Progress is simulated on a unit axis, so the same spring behaves the same
/// for a 10 px nudge and a full-screen throw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 settles without overshoot; lower values bounce.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// At rest once progress moves slower than this per second...
    pub velocity_threshold: f32,
    /// ...and sits within this distance of the target.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub const DAMPING_RATIO_NO_BOUNCE: f32 = 1.0;
    pub const DAMPING_RATIO_MEDIUM_BOUNCE: f32 = 0.5;
    pub const STIFFNESS_MEDIUM: f32 = 1500.0;
    pub const STIFFNESS_HIGH: f32 = 3000.0;

    pub const fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub const fn default_spring() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCE, Self::STIFFNESS_MEDIUM)
    }

    pub const fn bouncy() -> Self {
        Self::new(Self::DAMPING_RATIO_MEDIUM_BOUNCE, Self::STIFFNESS_MEDIUM)
    }

    pub const fn stiff() -> Self {
        Self::new(Self::DAMPING_RATIO_NO_BOUNCE, Self::STIFFNESS_HIGH)
    }

    /// Whether the spring can come to rest: stiffness, damping and both rest
    /// thresholds must be positive and finite.
    pub fn is_settling(&self) -> bool {
        [
            self.damping_ratio,
            self.stiffness,
            self.velocity_threshold,
            self.position_threshold,
        ]
        .iter()
        .all(|value| value.is_finite() && *value > 0.0)
    }

    fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * self.stiffness.sqrt()
    }

    /// Advances `(progress, velocity)` by `dt` seconds toward 1.0 with
    /// semi-implicit Euler steps of at most one 60 Hz frame. Returns whether
    /// the spring has come to rest.
    pub(crate) fn step(&self, progress: &mut f32, velocity: &mut f32, dt: f32) -> bool {
        const MAX_STEP_SECONDS: f32 = 0.016;
        const MAX_OVERSHOOT: f32 = 2.0;

        let damping = self.damping();
        let mut remaining = dt;
        while remaining > 0.0 {
            let step = remaining.min(MAX_STEP_SECONDS);
            let acceleration = -self.stiffness * (*progress - 1.0) - damping * *velocity;
            *velocity += acceleration * step;
            *progress = (*progress + *velocity * step).clamp(0.0, MAX_OVERSHOOT);
            remaining -= step;
        }

        velocity.abs() < self.velocity_threshold
            && (*progress - 1.0).abs() < self.position_threshold
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

/// Either kind of animation, as accepted by [`crate::Animatable::animate_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

impl From<AnimationSpec> for AnimationType {
    fn from(spec: AnimationSpec) -> Self {
        AnimationType::Tween(spec)
    }
}

impl From<SpringSpec> for AnimationType {
    fn from(spec: SpringSpec) -> Self {
        AnimationType::Spring(spec)
    }
}
