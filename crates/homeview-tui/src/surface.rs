use std::time::{Duration, Instant};

use homeview_core::DisplaySurface;

use crate::scroll::{ScrollAnimator, ScrollConfig};

/// A terminal scroll container made of equally sized items.
///
/// The extent is one item's size in cells along the scroll axis: rows for
/// the panel stack, columns for the news strip. Every offset change, from
/// user input or from an animation the engine requested, is reported back
/// once through [`ScrollSurface::frame`] so it can be fed to the engine as a
/// scroll sample.
///
/// Manual scrolling that stops between two items snaps to the nearest one
/// after [`SNAP_DELAY`].
#[derive(Debug, Clone)]
pub struct ScrollSurface {
    animator: ScrollAnimator,
    extent: f64,
    item_count: usize,
    reported: f64,
    snap_at: Option<Instant>,
}

/// Quiet period after manual scrolling before the view snaps
pub const SNAP_DELAY: Duration = Duration::from_millis(150);

impl ScrollSurface {
    pub fn new(config: ScrollConfig, item_count: usize) -> Self {
        Self {
            animator: ScrollAnimator::new(config),
            extent: 0.0,
            item_count,
            reported: 0.0,
            snap_at: None,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Largest valid offset: the start of the last item
    pub fn max_offset(&self) -> f64 {
        self.item_count.saturating_sub(1) as f64 * self.extent
    }

    /// Item under the leading edge and how far the view is into it, in cells
    pub fn split_offset(&self) -> (usize, u16) {
        if self.extent <= 0.0 {
            return (0, 0);
        }
        let offset = self.animator.current().round().max(0.0);
        let extent = self.extent.round().max(1.0);
        let first = (offset / extent).floor();
        let shift = offset - first * extent;
        (first as usize, shift as u16)
    }

    /// Whether the view rests exactly on one item
    pub fn is_at_rest(&self) -> bool {
        !self.animator.needs_update() && self.split_offset().1 == 0
    }

    pub fn needs_update(&self) -> bool {
        self.animator.needs_update()
    }

    /// Change the item size, keeping the same item in view
    pub fn set_extent(&mut self, extent: f64) {
        let extent = extent.max(0.0);
        if (extent - self.extent).abs() < f64::EPSILON {
            return;
        }
        let index = if self.extent > 0.0 {
            (self.animator.target() / self.extent).round()
        } else {
            0.0
        };
        self.extent = extent;
        let offset = index * extent;
        self.animator.set_scroll(offset);
        self.reported = offset;
    }

    /// Change the item count, clamping the view onto the remaining items
    pub fn set_item_count(&mut self, count: usize) {
        self.item_count = count;
        let max = self.max_offset();
        if self.animator.target() > max {
            self.animator.set_scroll(max);
        }
    }

    /// Manual scroll by `delta` cells
    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_by_at(delta, Instant::now());
    }

    pub fn scroll_by_at(&mut self, delta: f64, now: Instant) {
        let max = self.max_offset();
        self.animator.scroll_by(delta, max);
        self.snap_at = Some(now + SNAP_DELAY);
    }

    fn nearest_item_offset(&self) -> f64 {
        if self.extent <= 0.0 {
            return 0.0;
        }
        let index = (self.animator.current() / self.extent).round();
        (index * self.extent).clamp(0.0, self.max_offset())
    }

    /// Manual scroll by whole items, relative to where the view is heading
    pub fn step(&mut self, items: i64) {
        if self.extent <= 0.0 || self.item_count == 0 {
            return;
        }
        let current = (self.animator.target() / self.extent).round() as i64;
        let last = self.item_count as i64 - 1;
        let next = (current + items).clamp(0, last);
        self.animate_scroll_to(next as f64 * self.extent);
    }

    /// Advance the animation. Returns the new offset if it moved since the
    /// last report.
    pub fn frame(&mut self, now: Instant) -> Option<f64> {
        let max = self.max_offset();
        if let Some(at) = self.snap_at {
            if now >= at && !self.animator.needs_update() {
                self.snap_at = None;
                let target = self.nearest_item_offset();
                if (target - self.animator.current()).abs() > 1e-6 {
                    self.animator.scroll_to_at(target, max, now);
                }
            }
        }
        let offset = self.animator.update_at(max, now);
        if (offset - self.reported).abs() < 1e-6 {
            return None;
        }
        self.reported = offset;
        Some(offset)
    }
}

impl DisplaySurface for ScrollSurface {
    fn scroll_offset(&self) -> f64 {
        self.animator.current()
    }

    fn container_extent(&self) -> f64 {
        self.extent
    }

    fn animate_scroll_to(&mut self, offset: f64) {
        let max = self.max_offset();
        self.snap_at = None;
        self.animator.scroll_to(offset, max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeview_core::surface::scroll_to_item;

    fn instant_config() -> ScrollConfig {
        ScrollConfig {
            smooth_enabled: false,
            ..Default::default()
        }
    }

    #[test]
    fn test_frame_reports_each_change_once() {
        let mut surface = ScrollSurface::new(instant_config(), 4);
        surface.set_extent(20.0);
        let now = Instant::now();

        assert_eq!(surface.frame(now), None);
        scroll_to_item(&mut surface, 2);
        assert_eq!(surface.frame(now), Some(40.0));
        assert_eq!(surface.frame(now), None);
    }

    #[test]
    fn test_animation_reports_intermediate_offsets() {
        let mut surface = ScrollSurface::new(ScrollConfig::default(), 3);
        surface.set_extent(10.0);
        let start = Instant::now();
        surface.animate_scroll_to(10.0);

        let mid = surface.frame(start + Duration::from_millis(1)).unwrap_or(0.0);
        assert!(mid >= 0.0 && mid < 10.0);
        assert_eq!(surface.frame(start + Duration::from_secs(5)), Some(10.0));
        assert!(!surface.needs_update());
    }

    #[test]
    fn test_resize_keeps_item_in_view() {
        let mut surface = ScrollSurface::new(instant_config(), 4);
        surface.set_extent(20.0);
        surface.animate_scroll_to(60.0);
        surface.set_extent(30.0);
        assert_eq!(surface.scroll_offset(), 90.0);
        assert_eq!(surface.split_offset(), (3, 0));
    }

    #[test]
    fn test_split_offset_mid_scroll() {
        let mut surface = ScrollSurface::new(instant_config(), 3);
        surface.set_extent(10.0);
        surface.scroll_by(14.0);
        assert_eq!(surface.split_offset(), (1, 4));
        assert!(!surface.is_at_rest());
    }

    #[test]
    fn test_manual_scroll_snaps_to_nearest_item() {
        let mut surface = ScrollSurface::new(instant_config(), 3);
        surface.set_extent(10.0);
        let start = Instant::now();

        surface.scroll_by_at(14.0, start);
        assert_eq!(surface.frame(start + Duration::from_millis(20)), Some(14.0));
        assert_eq!(surface.frame(start + Duration::from_millis(100)), None);
        assert_eq!(surface.frame(start + SNAP_DELAY), Some(10.0));
        assert!(surface.is_at_rest());
    }

    #[test]
    fn test_step_clamps_to_items() {
        let mut surface = ScrollSurface::new(instant_config(), 3);
        surface.set_extent(10.0);
        surface.step(5);
        assert_eq!(surface.scroll_offset(), 20.0);
        surface.step(-1);
        assert_eq!(surface.scroll_offset(), 10.0);
    }

    #[test]
    fn test_shrinking_item_count_clamps_offset() {
        let mut surface = ScrollSurface::new(instant_config(), 5);
        surface.set_extent(10.0);
        surface.step(4);
        surface.set_item_count(2);
        assert_eq!(surface.scroll_offset(), 10.0);
    }
}
