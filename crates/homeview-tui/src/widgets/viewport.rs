//! Partially scrolled rendering of equally sized items.
//!
//! The two items straddling the view are drawn into an offscreen buffer
//! laid out back to back along the scroll axis, then the window at the
//! current shift is copied into the frame.

use ratatui::{buffer::Buffer, layout::Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Vertical,
    Horizontal,
}

/// Draw items `first` and `first + 1` of `count` so that `area` shows the
/// view moved `shift` cells past the start of `first`.
///
/// `render_item` receives a rect the size of `area` and the item index.
pub fn render_scrolled<F>(
    area: Rect,
    buf: &mut Buffer,
    axis: Axis,
    first: usize,
    shift: u16,
    count: usize,
    mut render_item: F,
) where
    F: FnMut(Rect, &mut Buffer, usize),
{
    if area.is_empty() || first >= count {
        return;
    }

    let (w, h) = (area.width, area.height);
    let length = match axis {
        Axis::Vertical => h,
        Axis::Horizontal => w,
    };
    let shift = shift.min(length.saturating_sub(1));

    if shift == 0 {
        render_item(area, buf, first);
        return;
    }

    let scratch_area = match axis {
        Axis::Vertical => Rect::new(0, 0, w, h.saturating_mul(2)),
        Axis::Horizontal => Rect::new(0, 0, w.saturating_mul(2), h),
    };
    let mut scratch = Buffer::empty(scratch_area);
    render_item(Rect::new(0, 0, w, h), &mut scratch, first);
    if first + 1 < count {
        let second = match axis {
            Axis::Vertical => Rect::new(0, h, w, h),
            Axis::Horizontal => Rect::new(w, 0, w, h),
        };
        render_item(second, &mut scratch, first + 1);
    }

    for dy in 0..h {
        for dx in 0..w {
            let (sx, sy) = match axis {
                Axis::Vertical => (dx, dy + shift),
                Axis::Horizontal => (dx + shift, dy),
            };
            let Some(src) = scratch.cell((sx, sy)).cloned() else {
                continue;
            };
            if let Some(dst) = buf.cell_mut((area.x + dx, area.y + dy)) {
                *dst = src;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::{Paragraph, Widget};

    fn label(area: Rect, buf: &mut Buffer, index: usize) {
        let lines: Vec<String> = (0..area.height).map(|r| format!("{}{}", index, r)).collect();
        Paragraph::new(lines.join("\n")).render(area, buf);
    }

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
    }

    #[test]
    fn test_at_rest_renders_single_item() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        render_scrolled(area, &mut buf, Axis::Vertical, 1, 0, 3, label);
        assert_eq!(row(&buf, 0), "10  ");
        assert_eq!(row(&buf, 2), "12  ");
    }

    #[test]
    fn test_vertical_shift_shows_both_items() {
        let area = Rect::new(0, 0, 4, 3);
        let mut buf = Buffer::empty(area);
        render_scrolled(area, &mut buf, Axis::Vertical, 0, 2, 2, label);
        assert_eq!(row(&buf, 0), "02  ");
        assert_eq!(row(&buf, 1), "10  ");
        assert_eq!(row(&buf, 2), "11  ");
    }

    #[test]
    fn test_horizontal_shift() {
        let area = Rect::new(2, 1, 3, 1);
        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 2));
        render_scrolled(area, &mut buf, Axis::Horizontal, 0, 2, 2, |a, b, i| {
            Paragraph::new(format!("{}{}{}", i, i, i)).render(a, b);
        });
        assert_eq!(row(&buf, 1), "  011 ");
    }

    #[test]
    fn test_last_item_leaves_blank_tail() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        render_scrolled(area, &mut buf, Axis::Vertical, 0, 1, 1, label);
        assert_eq!(row(&buf, 0), "01  ");
        assert_eq!(row(&buf, 1), "    ");
    }
}
