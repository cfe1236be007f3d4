//! Terminal rendition of the liquid pagination rail.
//!
//! Layout units are mapped onto cells with a single scale factor, capped so
//! that a default marker is two cells wide. The pill is a run of heavy
//! horizontal rules; markers are dots whose brightness follows their
//! opacity.

use homeview_core::pagination::LiquidLayout;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use crate::theme::{mix, Theme};

/// Cells per layout unit at most
const MAX_SCALE: f64 = 0.25;

/// Scale above which a marker is drawn with the large dot
const LARGE_DOT_SCALE: f64 = 1.15;

/// Placement of the rail inside an area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RailGeometry {
    /// Column where layout unit 0 lands
    pub origin: f64,
    /// Cells per layout unit
    pub scale: f64,
}

impl RailGeometry {
    pub fn fit(area: Rect, layout: &LiquidLayout) -> Option<Self> {
        if area.is_empty() || layout.markers.is_empty() || layout.rail_width <= 0.0 {
            return None;
        }
        let scale = (area.width as f64 / layout.rail_width).min(MAX_SCALE);
        let width = layout.rail_width * scale;
        let origin = area.x as f64 + ((area.width as f64 - width) / 2.0).floor();
        Some(Self { origin, scale })
    }

    pub fn to_cell(&self, units: f64) -> f64 {
        self.origin + units * self.scale
    }
}

fn marker_center(geometry: &RailGeometry, left: f64, diameter: f64) -> f64 {
    geometry.to_cell(left + diameter / 2.0)
}

pub struct LiquidRail<'a> {
    layout: &'a LiquidLayout,
    theme: &'a Theme,
}

impl<'a> LiquidRail<'a> {
    pub fn new(layout: &'a LiquidLayout, theme: &'a Theme) -> Self {
        Self { layout, theme }
    }

    /// Draw on the first row of `area`. Markers sit on top of the pill.
    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let Some(geometry) = RailGeometry::fit(area, self.layout) else {
            return;
        };
        let y = area.y;
        let right_edge = area.right();

        if let Some(pill) = self.layout.pill {
            let start = geometry.to_cell(pill.left).floor().max(area.x as f64) as u16;
            let end = geometry.to_cell(pill.right).ceil().min(right_edge as f64) as u16;
            for x in start..end.max(start + 1).min(right_edge) {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol("━")
                        .set_style(Style::default().fg(self.theme.accent));
                }
            }
        }

        for marker in &self.layout.markers {
            let x = marker_center(&geometry, marker.left, self.layout.marker_diameter).floor() as u16;
            let symbol = if marker.scale > LARGE_DOT_SCALE { "●" } else { "•" };
            let color = mix(self.theme.bg0, self.theme.marker, marker.opacity);
            if x < right_edge {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_symbol(symbol).set_fg(color);
                }
            }
        }
    }
}

/// Slot under `column`, if it is within half a marker pitch of one
pub fn marker_hit(area: Rect, layout: &LiquidLayout, column: u16) -> Option<usize> {
    let geometry = RailGeometry::fit(area, layout)?;
    let pitch = match layout.markers.as_slice() {
        [a, b, ..] => (b.left - a.left) * geometry.scale,
        _ => layout.marker_diameter * geometry.scale,
    };
    let reach = (pitch / 2.0).max(1.0);
    let point = column as f64 + 0.5;

    layout
        .markers
        .iter()
        .map(|m| {
            let center = marker_center(&geometry, m.left, layout.marker_diameter);
            (m.slot, (point - center).abs())
        })
        .filter(|(_, distance)| *distance <= reach)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(slot, _)| slot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeview_core::config::PaginationConfig;
    use homeview_core::pagination::{LiquidPagination, PaginationIndicator};

    fn pagination(count: usize, position: f64) -> LiquidPagination {
        let mut p = LiquidPagination::new(count, PaginationConfig::default());
        p.render(position);
        p
    }

    #[test]
    fn test_geometry_caps_scale_and_centres() {
        let p = pagination(5, 0.0);
        let geometry = RailGeometry::fit(Rect::new(0, 0, 40, 1), p.layout()).unwrap();
        assert_eq!(geometry.scale, 0.25);
        assert_eq!(geometry.origin, 9.0);
    }

    #[test]
    fn test_geometry_shrinks_on_narrow_area() {
        let p = pagination(5, 0.0);
        let geometry = RailGeometry::fit(Rect::new(0, 0, 10, 1), p.layout()).unwrap();
        assert!(geometry.scale < 0.25);
        assert!(RailGeometry::fit(Rect::new(0, 0, 0, 1), p.layout()).is_none());
    }

    #[test]
    fn test_render_at_rest() {
        let p = pagination(5, 0.0);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        LiquidRail::new(p.layout(), &theme).render(area, &mut buf);

        for x in [9, 10, 12, 13] {
            assert_eq!(buf[(x, 0)].symbol(), "━");
        }
        // Active marker shows large on top of the pill
        assert_eq!(buf[(11, 0)].symbol(), "●");
        assert_eq!(buf[(11, 0)].fg, theme.marker);
        assert_eq!(buf[(14, 0)].symbol(), " ");
        assert_eq!(buf[(15, 0)].symbol(), "•");
        assert_eq!(buf[(27, 0)].fg, mix(theme.bg0, theme.marker, 0.4));
    }

    #[test]
    fn test_halfway_markers_stay_small() {
        let p = pagination(5, 1.5);
        let theme = Theme::default();
        let area = Rect::new(0, 0, 40, 1);
        let mut buf = Buffer::empty(area);
        LiquidRail::new(p.layout(), &theme).render(area, &mut buf);

        assert_eq!(buf[(15, 0)].symbol(), "•");
        assert_eq!(buf[(17, 0)].symbol(), "━");
        assert_eq!(buf[(19, 0)].symbol(), "•");
        assert_eq!(buf[(23, 0)].symbol(), "•");
        assert_eq!(buf[(11, 0)].symbol(), "•");
    }

    #[test]
    fn test_marker_hit() {
        let p = pagination(5, 0.0);
        let area = Rect::new(0, 0, 40, 1);
        assert_eq!(marker_hit(area, p.layout(), 15), Some(1));
        assert_eq!(marker_hit(area, p.layout(), 16), Some(1));
        assert_eq!(marker_hit(area, p.layout(), 27), Some(4));
        assert_eq!(marker_hit(area, p.layout(), 0), None);
        assert_eq!(marker_hit(area, p.layout(), 39), None);
    }
}
