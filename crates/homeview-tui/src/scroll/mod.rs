//! Smooth scrolling for the panel stack and the news strip.
//!
//! - `easing` - maps config easing names onto the shared curves
//! - `timing` - progress of a time-boxed animation
//! - `config` - configuration types (re-exported from homeview-core)
//! - `animation` - animation controller combining the above
//!
//! Positions are `f64` so that a surface can report fractional offsets
//! while an animation runs; renderers round to whole cells.

pub mod config;
pub mod easing;
pub mod timing;

pub mod animation;

pub use animation::ScrollAnimator;
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
