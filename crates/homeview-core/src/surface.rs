//! Boundary to whatever actually scrolls on screen.

/// A scroll container the engine can observe and command.
///
/// Offsets and extents share one unit (terminal rows or columns, pixels,
/// ...). Item `i` starts at `i * container_extent()`.
pub trait DisplaySurface {
    /// Current scroll offset
    fn scroll_offset(&self) -> f64;

    /// Size of one item along the scroll axis
    fn container_extent(&self) -> f64;

    /// Start an animated scroll towards `offset`.
    ///
    /// The surface reports its movement back as scroll samples; it must not
    /// call into the engine synchronously.
    fn animate_scroll_to(&mut self, offset: f64);
}

/// Animate `surface` so that item `index` fills the container
pub fn scroll_to_item(surface: &mut dyn DisplaySurface, index: usize) {
    let offset = index as f64 * surface.container_extent();
    surface.animate_scroll_to(offset);
}

/// The two scroll containers the kiosk drives
pub struct Surfaces<'a> {
    pub panels: &'a mut dyn DisplaySurface,
    pub news: &'a mut dyn DisplaySurface,
}
