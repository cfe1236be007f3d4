use homeview_core::Feedback;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::theme::Theme;

pub struct ToastWidget;

impl ToastWidget {
    /// Small framed box in the middle of `area` with the feedback text
    pub fn render(frame: &mut Frame, area: Rect, feedback: &Feedback, theme: &Theme) {
        let text = truncate_str(&feedback.text, 30);
        let width = (text.width() as u16 + 8).min(area.width);
        let height = 3u16.min(area.height);
        let popup_area = centered_rect(width, height, area);

        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .style(Style::default().bg(theme.bg1));

        let line = Line::from(vec![
            Span::styled(
                format!("{} ", feedback.icon.glyph()),
                Style::default().fg(theme.accent),
            ),
            Span::styled(
                text,
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
        ]);

        frame.render_widget(
            Paragraph::new(line).block(block).alignment(Alignment::Center),
            popup_area,
        );
    }
}

/// Helper function to create a centered rect
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

/// Truncate a string to max length with ellipsis
fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeview_core::FeedbackIcon;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_centered_rect() {
        assert_eq!(centered_rect(10, 3, Rect::new(0, 0, 40, 11)), Rect::new(15, 4, 10, 3));
        assert_eq!(centered_rect(50, 3, Rect::new(2, 0, 40, 3)), Rect::new(2, 0, 50, 3));
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a much longer message", 10), "a much ...");
    }

    #[test]
    fn test_render_shows_icon_and_text() {
        let theme = Theme::default();
        let feedback = Feedback::new("Rotation OFF", FeedbackIcon::Pause);
        let mut terminal = Terminal::new(TestBackend::new(40, 7)).unwrap();
        terminal
            .draw(|f| ToastWidget::render(f, f.area(), &feedback, &theme))
            .unwrap();

        let buf = terminal.backend().buffer();
        let row: String = (0..40).map(|x| buf[(x, 3)].symbol().to_string()).collect();
        assert!(row.contains("Rotation OFF"));
        assert!(row.contains("⏸"));
    }
}
