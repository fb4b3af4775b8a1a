//! Frame-driven tweens and springs for SwipeDeck.
//!
//! [`Animatable`] moves a value toward a target on the runtime's frame clock,
//! following either an eased [`AnimationSpec`] or a [`SpringSpec`].

pub mod animatable;
pub mod easing;
pub mod spec;

pub use animatable::{Animatable, Lerp};
pub use easing::{CubicBezier, Easing};
pub use spec::{AnimationSpec, AnimationType, SpringSpec};

pub mod prelude {
    pub use crate::animatable::{Animatable, Lerp};
    pub use crate::easing::Easing;
    pub use crate::spec::{AnimationSpec, AnimationType, SpringSpec};
}
