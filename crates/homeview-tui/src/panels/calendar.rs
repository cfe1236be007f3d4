use chrono::{Days, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{panel_block, PanelRenderer, RenderContext};

const DAYS_SHOWN: u64 = 7;

/// One agenda row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgendaDay {
    pub date: NaiveDate,
    pub is_today: bool,
    pub time: &'static str,
    pub title: &'static str,
}

impl AgendaDay {
    /// "Mon 17"
    pub fn badge(&self) -> String {
        self.date.format("%a %d").to_string()
    }
}

/// The week starting at `today`
pub fn agenda(today: NaiveDate) -> Vec<AgendaDay> {
    (0..DAYS_SHOWN)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| {
            let is_today = date == today;
            AgendaDay {
                date,
                is_today,
                time: "10:00 AM - 11:30 AM",
                title: if is_today { "Team Sync & Review" } else { "Focus Time" },
            }
        })
        .collect()
}

#[derive(Default)]
pub struct CalendarPanel;

impl CalendarPanel {
    pub fn new() -> Self {
        Self
    }
}

impl PanelRenderer for CalendarPanel {
    fn title(&self) -> &str {
        "Calendar"
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let block = panel_block(self.title(), theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = agenda(ctx.now.date_naive())
            .into_iter()
            .map(|day| {
                let badge_style = if day.is_today {
                    Style::default()
                        .fg(theme.bg0)
                        .bg(theme.today)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(theme.fg0).bg(theme.bg2)
                };
                Line::from(vec![
                    Span::raw(" "),
                    Span::styled(format!(" {} ", day.badge()), badge_style),
                    Span::styled(format!("  {}  ", day.time), Style::default().fg(theme.grey1)),
                    Span::styled(day.title, Style::default().fg(theme.fg1)),
                ])
            })
            .collect();

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{buffer_text, Fixture};
    use super::*;

    #[test]
    fn test_agenda_covers_a_week() {
        let today = NaiveDate::from_ymd_opt(2024, 2, 27).unwrap();
        let days = agenda(today);
        assert_eq!(days.len(), 7);
        assert!(days[0].is_today);
        assert_eq!(days[0].title, "Team Sync & Review");
        assert_eq!(days[1].title, "Focus Time");
        // Crosses the leap day into March
        assert_eq!(days[2].date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
    }

    #[test]
    fn test_badge_format() {
        let days = agenda(NaiveDate::from_ymd_opt(2024, 2, 27).unwrap());
        assert_eq!(days[0].badge(), "Tue 27");
    }

    #[test]
    fn test_render_lists_today_entry() {
        let fixture = Fixture::new(0);
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        CalendarPanel::new().render(area, &mut buf, &fixture.ctx());
        let text = buffer_text(&buf);
        assert!(text.contains("Team Sync & Review"));
        assert!(text.contains("Focus Time"));
    }
}
