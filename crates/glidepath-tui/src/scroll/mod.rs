//! Smooth scroll source for the step guide
//!
//! The guide consumes a normalized scroll fraction. In the terminal that
//! fraction is produced here: key and wheel input move a target fraction and
//! the animator eases the visible fraction toward it frame by frame.
//!
//! - `config` - duration and frame-rate helpers over `ScrollConfig`
//! - `timing` - progress and interpolation atoms
//! - `animation` - `FractionAnimator`, combining the two with an easing curve

pub mod animation;
pub mod config;
pub mod timing;

pub use animation::FractionAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
