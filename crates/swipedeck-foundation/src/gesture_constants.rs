//! Shared gesture constants for swipe-card handling.
//!
//! Distances are in logical pixels and velocities in logical pixels per
//! second. Hosts override any of them through [`crate::SwipeConfig`].
//!
//! # DPI Considerations
//!
//! For very high-density touch screens, consider scaling the pixel values by
//! the device's DPI factor before handing them to the config.

/// Fraction of the viewport width a card has to travel horizontally before
/// release commits it.
pub const SWIPE_THRESHOLD: f32 = 0.25;

/// Duration of the commit and reset animations in milliseconds.
pub const ANIMATION_DURATION_MS: u64 = 250;

/// Rotation, in degrees, of a card dragged a full viewport width.
pub const MAX_ROTATION_DEGREES: f32 = 15.0;

/// Vertical drag, in logical pixels, that reveals the profile detail sheet
/// while the drag is mostly vertical.
pub const REVEAL_THRESHOLD: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Release velocity that commits a card on screens with fling commits enabled.
pub const FLING_COMMIT_VELOCITY: f32 = 800.0;

/// Scale lost per card of depth behind the active card.
pub const STACK_SCALE_STEP: f32 = 0.05;

/// Smallest scale a card behind the active one is drawn at.
pub const MIN_STACK_SCALE: f32 = 0.8;
