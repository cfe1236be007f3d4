//! Panel rotation: which panel is visible and when it changes.
//!
//! - `state` - panel specs and the carousel state record
//! - `scheduler` - auto-advance timer and current index
//! - `tracker` - debounced scroll position to index reconciliation
//! - `strip` - index holder for sub-carousels without a clock

mod scheduler;
mod state;
mod strip;
mod tracker;

pub use scheduler::RotationScheduler;
pub use state::{CarouselState, PanelSpec};
pub use strip::CardStrip;
pub use tracker::{ScrollPositionTracker, ScrollSession, ScrollTarget};
