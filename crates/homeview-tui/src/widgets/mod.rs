mod header;
mod liquid;
mod pagination;
mod popup;
mod status_bar;
mod viewport;

pub use header::{clock_date, clock_time, HeaderWidget};
pub use liquid::{marker_hit, LiquidRail, RailGeometry};
pub use pagination::{marker_at, marker_rects, PaginationWidget};
pub use popup::ToastWidget;
pub use status_bar::{rotation_label, StatusBarWidget};
pub use viewport::{render_scrolled, Axis};
