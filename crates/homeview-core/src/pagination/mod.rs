//! Position indicators for scroll containers.
//!
//! Two variants share one capability: `render` takes the current position
//! (a fractional index) and `handle_click` turns a marker click into a
//! scroll request on the surface. Clicks never touch carousel state
//! directly; the resulting scroll settles through the tracker like any
//! manual swipe.

mod discrete;
mod liquid;

pub use discrete::DiscretePagination;
pub use liquid::{LiquidLayout, LiquidPagination, LiquidPaginationState, MarkerStyle, PillBounds};

use crate::surface::DisplaySurface;

pub trait PaginationIndicator {
    /// Number of markers currently drawn
    fn marker_count(&self) -> usize;

    /// Update from a scroll position expressed as a fractional item index
    fn render(&mut self, position: f64);

    /// Navigate to the item behind marker `marker`
    fn handle_click(&self, marker: usize, surface: &mut dyn DisplaySurface);
}
