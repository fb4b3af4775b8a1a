use swipedeck_animation::{AnimationSpec, AnimationType, Easing, SpringSpec};
use swipedeck_core::{Offset, Size};

use super::{SwipeDirection, SwipeError};
use crate::gesture_constants::{
    ANIMATION_DURATION_MS, FLING_COMMIT_VELOCITY, MAX_FLING_VELOCITY, MAX_ROTATION_DEGREES,
    REVEAL_THRESHOLD, SWIPE_THRESHOLD,
};

/// Tuning for one swipe-card surface.
///
/// Each screen that shows swipeable cards configures a controller instead of
/// re-implementing the gesture. Defaults match the profile deck; see
/// [`SwipeConfig::discover`] for the fling-enabled variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Area the card moves in; scales thresholds and exit targets.
    pub viewport: Size,
    /// Fraction of `viewport.width` that commits on release.
    pub swipe_threshold: f32,
    /// Release speed in px/s that commits even below `swipe_threshold`.
    /// `None` disables velocity commits.
    pub velocity_threshold: Option<f32>,
    /// Fraction of `viewport.height` an upward drag needs to commit `Up`.
    /// `None` disables the up swipe.
    pub up_swipe_threshold: Option<f32>,
    /// Vertical drag in px that reveals the detail sheet.
    pub reveal_threshold: f32,
    pub max_rotation_degrees: f32,
    /// Multiplier on the viewport dimension used as the exit distance.
    pub exit_distance_factor: f32,
    pub commit_animation: AnimationSpec,
    pub reset_animation: AnimationType,
    /// Cap applied to velocities computed from pointer samples.
    pub max_fling_velocity: f32,
}

impl SwipeConfig {
    /// Defaults for a viewport of the given size.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Size::new(width, height),
            ..Self::default()
        }
    }

    /// Profile browsing deck: displacement-only commits.
    pub fn profile_deck(width: f32, height: f32) -> Self {
        Self::new(width, height)
    }

    /// Discovery screen: higher threshold, fling commits, bouncy reset and
    /// super like on upward swipes.
    pub fn discover(width: f32, height: f32) -> Self {
        Self::new(width, height)
            .with_swipe_threshold(0.3)
            .with_velocity_threshold(FLING_COMMIT_VELOCITY)
            .with_up_swipe_threshold(0.2)
            .with_commit_animation(AnimationSpec::tween(200, Easing::FastOutLinear))
            .with_reset_animation(SpringSpec::bouncy())
    }

    pub fn with_viewport(mut self, viewport: Size) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn with_swipe_threshold(mut self, fraction: f32) -> Self {
        self.swipe_threshold = fraction;
        self
    }

    pub fn with_velocity_threshold(mut self, velocity: f32) -> Self {
        self.velocity_threshold = Some(velocity);
        self
    }

    pub fn without_velocity_threshold(mut self) -> Self {
        self.velocity_threshold = None;
        self
    }

    pub fn with_up_swipe_threshold(mut self, fraction: f32) -> Self {
        self.up_swipe_threshold = Some(fraction);
        self
    }

    pub fn with_reveal_threshold(mut self, pixels: f32) -> Self {
        self.reveal_threshold = pixels;
        self
    }

    pub fn with_max_rotation_degrees(mut self, degrees: f32) -> Self {
        self.max_rotation_degrees = degrees;
        self
    }

    pub fn with_exit_distance_factor(mut self, factor: f32) -> Self {
        self.exit_distance_factor = factor;
        self
    }

    /// Sets both the commit and the reset animation to a tween of `millis`.
    pub fn with_animation_duration(mut self, millis: u64) -> Self {
        self.commit_animation.duration_millis = millis;
        self.reset_animation = match self.reset_animation {
            AnimationType::Tween(spec) => AnimationType::Tween(AnimationSpec {
                duration_millis: millis,
                ..spec
            }),
            AnimationType::Spring(_) => {
                AnimationType::Tween(AnimationSpec::tween(millis, Easing::FastOutSlowIn))
            }
        };
        self
    }

    pub fn with_commit_animation(mut self, spec: AnimationSpec) -> Self {
        self.commit_animation = spec;
        self
    }

    pub fn with_reset_animation(mut self, animation: impl Into<AnimationType>) -> Self {
        self.reset_animation = animation.into();
        self
    }

    pub fn with_max_fling_velocity(mut self, velocity: f32) -> Self {
        self.max_fling_velocity = velocity;
        self
    }

    /// Horizontal travel in px that commits on release.
    pub fn horizontal_threshold_px(&self) -> f32 {
        self.swipe_threshold * self.viewport.width
    }

    /// Upward travel in px that commits `Up`, when enabled.
    pub fn up_threshold_px(&self) -> Option<f32> {
        self.up_swipe_threshold
            .map(|fraction| fraction * self.viewport.height)
    }

    /// Tilt for a card displaced `x` px horizontally.
    ///
    /// Linear in `x` up to one viewport width, saturating at
    /// `±max_rotation_degrees` beyond it.
    pub fn rotation_for(&self, x: f32) -> f32 {
        if self.viewport.width <= 0.0 || !x.is_finite() {
            return 0.0;
        }
        (x / self.viewport.width).clamp(-1.0, 1.0) * self.max_rotation_degrees
    }

    /// Off-screen resting point for a card committed in `direction`.
    pub fn exit_target(&self, direction: SwipeDirection) -> Offset {
        let distance = match direction {
            SwipeDirection::Left | SwipeDirection::Right => self.viewport.width,
            SwipeDirection::Up => self.viewport.height,
        } * self.exit_distance_factor;
        direction.unit() * distance
    }

    pub fn validate(&self) -> Result<(), SwipeError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), SwipeError> {
            Err(SwipeError::InvalidConfig { field, reason })
        }

        if !(self.viewport.width.is_finite() && self.viewport.width > 0.0) {
            return invalid("viewport.width", "must be positive and finite");
        }
        if !(self.viewport.height.is_finite() && self.viewport.height > 0.0) {
            return invalid("viewport.height", "must be positive and finite");
        }
        if !(self.swipe_threshold > 0.0 && self.swipe_threshold <= 1.0) {
            return invalid("swipe_threshold", "must be in (0, 1]");
        }
        if let Some(fraction) = self.up_swipe_threshold {
            if !(fraction > 0.0 && fraction <= 1.0) {
                return invalid("up_swipe_threshold", "must be in (0, 1]");
            }
        }
        if let Some(velocity) = self.velocity_threshold {
            if !(velocity.is_finite() && velocity > 0.0) {
                return invalid("velocity_threshold", "must be positive and finite");
            }
        }
        if !(self.reveal_threshold.is_finite() && self.reveal_threshold >= 0.0) {
            return invalid("reveal_threshold", "must be non-negative and finite");
        }
        if !(self.max_rotation_degrees.is_finite() && self.max_rotation_degrees >= 0.0) {
            return invalid("max_rotation_degrees", "must be non-negative and finite");
        }
        if !(self.exit_distance_factor.is_finite() && self.exit_distance_factor >= 1.0) {
            return invalid("exit_distance_factor", "must be at least 1.0");
        }
        if !(self.max_fling_velocity.is_finite() && self.max_fling_velocity > 0.0) {
            return invalid("max_fling_velocity", "must be positive and finite");
        }
        if let AnimationType::Spring(spring) = self.reset_animation {
            if !spring.is_settling() {
                return invalid(
                    "reset_animation",
                    "spring stiffness, damping and thresholds must be positive and finite",
                );
            }
        }
        Ok(())
    }
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            viewport: Size::new(400.0, 800.0),
            swipe_threshold: SWIPE_THRESHOLD,
            velocity_threshold: None,
            up_swipe_threshold: None,
            reveal_threshold: REVEAL_THRESHOLD,
            max_rotation_degrees: MAX_ROTATION_DEGREES,
            exit_distance_factor: 1.0,
            commit_animation: AnimationSpec::tween(
                ANIMATION_DURATION_MS,
                Easing::FastOutLinear,
            ),
            reset_animation: AnimationType::Tween(AnimationSpec::tween(
                ANIMATION_DURATION_MS,
                Easing::FastOutSlowIn,
            )),
            max_fling_velocity: MAX_FLING_VELOCITY,
        }
    }
}
