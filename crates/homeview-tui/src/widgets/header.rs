use chrono::{DateTime, Local};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::theme::Theme;

/// "HH:MM"
pub fn clock_time(now: &DateTime<Local>) -> String {
    now.format("%H:%M").to_string()
}

/// "YYYY/MM/DD Ddd"
pub fn clock_date(now: &DateTime<Local>) -> String {
    now.format("%Y/%m/%d %a").to_string()
}

pub struct HeaderWidget;

impl HeaderWidget {
    /// Clock on the left, title of the visible panel on the right
    pub fn render(frame: &mut Frame, area: Rect, now: &DateTime<Local>, panel_title: &str, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(theme.bg2))
            .style(Style::default().bg(theme.bg0));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(24)])
            .split(inner);

        let clock = Line::from(vec![
            Span::styled(
                format!(" {}", clock_time(now)),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", clock_date(now)),
                Style::default().fg(theme.grey2),
            ),
        ]);
        frame.render_widget(Paragraph::new(clock), chunks[0]);

        let title = Paragraph::new(Line::from(Span::styled(
            format!("{} ", panel_title),
            Style::default().fg(theme.accent),
        )))
        .alignment(Alignment::Right);
        frame.render_widget(title, chunks[1]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_clock_formats() {
        let now = Local.with_ymd_and_hms(2024, 3, 5, 7, 4, 0).unwrap();
        assert_eq!(clock_time(&now), "07:04");
        assert_eq!(clock_date(&now), "2024/03/05 Tue");
    }
}
