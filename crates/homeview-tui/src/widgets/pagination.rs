use homeview_core::pagination::DiscretePagination;
use ratatui::{layout::Rect, style::Style, Frame};

use crate::theme::Theme;

/// One cell per marker, stacked in a column centred in `area`
pub fn marker_rects(area: Rect, count: usize) -> Vec<Rect> {
    if area.is_empty() || count == 0 {
        return Vec::new();
    }
    let count = count.min(area.height as usize) as u16;
    // Leave a blank row between dots when there is room
    let pitch = if count * 2 - 1 <= area.height { 2 } else { 1 };
    let used = (count - 1) * pitch + 1;
    let top = area.y + (area.height - used) / 2;
    let x = area.x + area.width / 2;

    (0..count).map(|i| Rect::new(x, top + i * pitch, 1, 1)).collect()
}

/// Marker on `row`, clicking anywhere across the column's width
pub fn marker_at(area: Rect, count: usize, column: u16, row: u16) -> Option<usize> {
    if column < area.x || column >= area.right() {
        return None;
    }
    marker_rects(area, count).iter().position(|r| r.y == row)
}

pub struct PaginationWidget;

impl PaginationWidget {
    pub fn render(frame: &mut Frame, area: Rect, pagination: &DiscretePagination, theme: &Theme) {
        let markers = pagination.markers();
        let buf = frame.buffer_mut();
        for (rect, active) in marker_rects(area, markers.len()).iter().zip(markers) {
            let (symbol, color) = if *active {
                ("●", theme.accent)
            } else {
                ("○", theme.grey0)
            };
            if let Some(cell) = buf.cell_mut((rect.x, rect.y)) {
                cell.set_symbol(symbol).set_style(Style::default().fg(color));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_markers_centred_with_gaps() {
        let rects = marker_rects(Rect::new(10, 0, 3, 11), 4);
        let rows: Vec<_> = rects.iter().map(|r| r.y).collect();
        assert_eq!(rows, vec![2, 4, 6, 8]);
        assert!(rects.iter().all(|r| r.x == 11));
    }

    #[test]
    fn test_tight_area_drops_gaps() {
        let rects = marker_rects(Rect::new(0, 0, 1, 4), 4);
        let rows: Vec<_> = rects.iter().map(|r| r.y).collect();
        assert_eq!(rows, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_marker_at() {
        let area = Rect::new(10, 0, 3, 11);
        assert_eq!(marker_at(area, 4, 12, 6), Some(2));
        assert_eq!(marker_at(area, 4, 12, 5), None);
        assert_eq!(marker_at(area, 4, 9, 6), None);
    }

    #[test]
    fn test_render_highlights_active() {
        let mut pagination = DiscretePagination::new(3);
        pagination.set_active(1);
        let theme = Theme::default();
        let mut terminal = Terminal::new(TestBackend::new(3, 5)).unwrap();
        terminal
            .draw(|f| PaginationWidget::render(f, f.area(), &pagination, &theme))
            .unwrap();

        let buf = terminal.backend().buffer();
        assert_eq!(buf[(1, 0)].symbol(), "○");
        assert_eq!(buf[(1, 2)].symbol(), "●");
        assert_eq!(buf[(1, 4)].symbol(), "○");
    }
}
