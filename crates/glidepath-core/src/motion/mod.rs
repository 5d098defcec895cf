//! Time-based motion primitives
//!
//! - `easing` - pure easing curves mapping [0, 1] to [0, 1]
//! - `spring` - discrete-time critically damped spring integrator

pub mod easing;
pub mod spring;

pub use easing::EasingTypeExt;
pub use spring::SpringState;
