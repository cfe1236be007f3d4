//! Liquid pagination: a rail of fixed markers under one stretchy pill.
//!
//! Geometry is in abstract layout units (marker diameter, gap); renderers
//! scale it to pixels or terminal cells. Between two items the pill's
//! trailing edge follows an ease-in curve and its leading edge an ease-out
//! curve, so the pill stretches towards the next marker before letting go
//! of the previous one.

use super::PaginationIndicator;
use crate::config::PaginationConfig;
use crate::easing::{blend, cubic_in, cubic_out, lerp};
use crate::surface::{scroll_to_item, DisplaySurface};

/// Derived state, recomputed on every scroll sample
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LiquidPaginationState {
    /// Fractional item index, 2.35 = 35% of the way from item 2 to item 3
    pub scroll_progress: f64,
    /// First item shown when there are more items than marker slots
    pub visible_window_start: usize,
}

/// Horizontal extent of the pill
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PillBounds {
    pub left: f64,
    pub right: f64,
}

impl PillBounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Appearance of one rail marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Item this marker stands for
    pub item: usize,
    /// Position within the visible window
    pub slot: usize,
    /// Left edge in layout units
    pub left: f64,
    /// 1.0 at rest, larger next to the pill
    pub scale: f64,
    /// Between the configured rest opacity and 1.0
    pub opacity: f64,
}

impl MarkerStyle {
    /// 0.0 at rest, 1.0 when the pill sits exactly on this marker
    pub fn emphasis(&self, rest_opacity: f64) -> f64 {
        if rest_opacity >= 1.0 {
            return 0.0;
        }
        ((self.opacity - rest_opacity) / (1.0 - rest_opacity)).clamp(0.0, 1.0)
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LiquidLayout {
    pub window_start: usize,
    pub markers: Vec<MarkerStyle>,
    /// None when there are no items
    pub pill: Option<PillBounds>,
    /// Total width of rail plus pill overhang
    pub rail_width: f64,
    pub marker_diameter: f64,
}

#[derive(Debug, Clone)]
pub struct LiquidPagination {
    config: PaginationConfig,
    count: usize,
    state: LiquidPaginationState,
    layout: LiquidLayout,
}

impl LiquidPagination {
    pub fn new(count: usize, config: PaginationConfig) -> Self {
        let mut pagination = Self {
            config,
            count,
            state: LiquidPaginationState::default(),
            layout: LiquidLayout::default(),
        };
        pagination.recompute(0.0);
        pagination
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.count
    }

    pub fn state(&self) -> &LiquidPaginationState {
        &self.state
    }

    pub fn layout(&self) -> &LiquidLayout {
        &self.layout
    }

    /// Replace the item count and lay out again at the current position
    pub fn set_item_count(&mut self, count: usize) {
        self.count = count;
        self.recompute(self.state.scroll_progress);
    }

    /// Whether the item count exceeds the marker budget
    pub fn is_windowed(&self) -> bool {
        self.count > self.config.visible_budget
    }

    fn pitch(&self) -> f64 {
        self.config.marker_diameter + self.config.marker_gap
    }

    fn pill_width(&self) -> f64 {
        self.config.marker_diameter * self.config.pill_width_ratio
    }

    /// Room left of slot 0 so a pill centred on it never goes negative
    fn padding(&self) -> f64 {
        ((self.pill_width() - self.config.marker_diameter) / 2.0).max(0.0)
    }

    fn marker_left(&self, slot: usize) -> f64 {
        self.padding() + slot as f64 * self.pitch()
    }

    /// Pill bounds when resting on `slot`
    pub fn rest_bounds(&self, slot: usize) -> PillBounds {
        let d = self.config.marker_diameter;
        let center = self.marker_left(slot) + d / 2.0;
        let half = self.pill_width().max(d) / 2.0;
        PillBounds {
            left: center - half,
            right: center + half,
        }
    }

    fn recompute(&mut self, progress: f64) {
        let d = self.config.marker_diameter;
        if self.count == 0 {
            self.state = LiquidPaginationState::default();
            self.layout = LiquidLayout {
                marker_diameter: d,
                ..LiquidLayout::default()
            };
            return;
        }

        let last = (self.count - 1) as f64;
        let progress = if progress.is_finite() {
            progress.clamp(0.0, last)
        } else {
            0.0
        };
        let budget = self.config.visible_budget.max(1);
        let visible = self.count.min(budget);
        let active = progress.round() as usize;
        let window_start = window_start(active, self.count, budget);

        // Pill position within the window
        let local = (progress - window_start as f64).clamp(0.0, (visible - 1) as f64);
        let base = local.floor() as usize;
        let next = (base + 1).min(visible - 1);
        let t = local - base as f64;

        let from = self.rest_bounds(base);
        let to = self.rest_bounds(next);
        let weight = self.config.ease_blend;
        let left = lerp(from.left, to.left, blend(cubic_in(t), t, weight));
        let mut right = lerp(from.right, to.right, blend(cubic_out(t), t, weight));
        if right - left < d {
            right = left + d;
        }

        let rest = self.config.rest_opacity.clamp(0.0, 1.0);
        let markers = (0..visible)
            .map(|slot| {
                let item = window_start + slot;
                let boost = (1.0 - (item as f64 - progress).abs()).max(0.0);
                MarkerStyle {
                    item,
                    slot,
                    left: self.marker_left(slot),
                    scale: 1.0 + boost * self.config.neighbor_scale_boost,
                    opacity: rest + (1.0 - rest) * boost,
                }
            })
            .collect();

        self.state = LiquidPaginationState {
            scroll_progress: progress,
            visible_window_start: window_start,
        };
        self.layout = LiquidLayout {
            window_start,
            markers,
            pill: Some(PillBounds { left, right }),
            rail_width: 2.0 * self.padding() + (visible - 1) as f64 * self.pitch() + d,
            marker_diameter: d,
        };
    }
}

/// First item of the visible window.
///
/// The window jumps a whole budget at a time, so the active marker cycles
/// through slots `0..budget` as the index grows; near the end the window is
/// pinned so it stays full.
pub fn window_start(active: usize, count: usize, budget: usize) -> usize {
    if budget == 0 || count <= budget {
        return 0;
    }
    let aligned = active - active % budget;
    aligned.min(count - budget)
}

impl PaginationIndicator for LiquidPagination {
    fn marker_count(&self) -> usize {
        self.layout.markers.len()
    }

    fn render(&mut self, position: f64) {
        self.recompute(position);
    }

    fn handle_click(&self, marker: usize, surface: &mut dyn DisplaySurface) {
        let item = self.layout.window_start + marker;
        if marker < self.layout.markers.len() && item < self.count {
            scroll_to_item(surface, item);
        }
    }
}
