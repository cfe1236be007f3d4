//! Panel content. Each panel draws itself into one page of the stack.

mod calendar;
mod news;
mod notes;
mod weather;

pub use calendar::CalendarPanel;
pub use news::{news_layout, NewsPanel};
pub use notes::NotesPanel;
pub use weather::{Condition, WeatherPanel, WeatherReport};

use chrono::{DateTime, Local};
use homeview_core::pagination::LiquidPagination;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::surface::ScrollSurface;
use crate::theme::Theme;

/// Everything shared by panels during one draw
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub now: DateTime<Local>,
    pub news_surface: &'a ScrollSurface,
    pub news_pagination: &'a LiquidPagination,
}

pub trait PanelRenderer {
    fn title(&self) -> &str;

    /// Draw into `area`. Called on every frame, including mid-scroll.
    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>);
}

/// Which renderer a configured panel id maps to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelKind {
    Weather,
    News,
    Calendar,
    Notes,
    Unknown(String),
}

impl PanelKind {
    pub fn from_id(id: &str) -> Self {
        match id.to_lowercase().as_str() {
            "weather" => PanelKind::Weather,
            "news" => PanelKind::News,
            "calendar" => PanelKind::Calendar,
            "notes" => PanelKind::Notes,
            _ => PanelKind::Unknown(id.to_string()),
        }
    }
}

/// Framed page with the panel title
pub(crate) fn panel_block<'a>(title: &'a str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.grey0))
        .title_style(Style::default().fg(theme.accent))
        .style(Style::default().bg(theme.bg0))
}

/// Stand-in for panel ids nothing knows how to draw
pub struct PlaceholderPanel {
    id: String,
}

impl PlaceholderPanel {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl PanelRenderer for PlaceholderPanel {
    fn title(&self) -> &str {
        &self.id
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let block = panel_block(&self.id, ctx.theme);
        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(Line::from(format!("Unknown panel \"{}\"", self.id)))
            .style(Style::default().fg(ctx.theme.grey1))
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use homeview_core::config::PaginationConfig;
    use homeview_core::ScrollConfig;

    pub struct Fixture {
        pub theme: Theme,
        pub surface: ScrollSurface,
        pub pagination: LiquidPagination,
        pub now: DateTime<Local>,
    }

    impl Fixture {
        pub fn new(news_items: usize) -> Self {
            Self {
                theme: Theme::default(),
                surface: ScrollSurface::new(ScrollConfig::default(), news_items),
                pagination: LiquidPagination::new(news_items, PaginationConfig::default()),
                now: Local::now(),
            }
        }

        pub fn ctx(&self) -> RenderContext<'_> {
            RenderContext {
                theme: &self.theme,
                now: self.now,
                news_surface: &self.surface,
                news_pagination: &self.pagination,
            }
        }
    }

    /// All symbols of the buffer joined row by row
    pub fn buffer_text(buf: &Buffer) -> String {
        let area = buf.area;
        let mut text = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                text.push_str(buf[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{buffer_text, Fixture};
    use super::*;

    #[test]
    fn test_panel_kind_from_id() {
        assert_eq!(PanelKind::from_id("Weather"), PanelKind::Weather);
        assert_eq!(PanelKind::from_id("notes"), PanelKind::Notes);
        assert_eq!(
            PanelKind::from_id("stocks"),
            PanelKind::Unknown("stocks".to_string())
        );
    }

    #[test]
    fn test_placeholder_names_the_id() {
        let fixture = Fixture::new(0);
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        PlaceholderPanel::new("stocks").render(area, &mut buf, &fixture.ctx());
        assert!(buffer_text(&buf).contains("Unknown panel \"stocks\""));
    }
}
