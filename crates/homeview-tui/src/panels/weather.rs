use chrono::{Datelike, NaiveDate};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::{panel_block, PanelRenderer, RenderContext};
use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Sunny,
    Cloudy,
    Rainy,
}

impl Condition {
    pub fn label(&self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Sunny => "☀",
            Condition::Cloudy => "☁",
            Condition::Rainy => "☂",
        }
    }

    /// Current, high and low temperature in °C
    fn temperatures(&self) -> (i32, i32, i32) {
        match self {
            Condition::Sunny => (24, 28, 18),
            Condition::Cloudy => (18, 20, 15),
            Condition::Rainy => (14, 16, 12),
        }
    }

    fn color(&self, theme: &Theme) -> ratatui::style::Color {
        match self {
            Condition::Sunny => theme.yellow,
            Condition::Cloudy => theme.grey2,
            Condition::Rainy => theme.blue,
        }
    }
}

/// Hours shown in the forecast row
const FORECAST_HOURS: [u32; 6] = [12, 15, 18, 21, 0, 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherReport {
    pub city: String,
    pub condition: Condition,
    pub temp: i32,
    pub high: i32,
    pub low: i32,
    /// (hour, temperature)
    pub forecast: Vec<(u32, i32)>,
}

impl WeatherReport {
    /// Built-in demo weather; the same date always gives the same report
    pub fn demo(city: &str, date: NaiveDate) -> Self {
        let condition = match date.ordinal() % 3 {
            0 => Condition::Sunny,
            1 => Condition::Cloudy,
            _ => Condition::Rainy,
        };
        let (temp, high, low) = condition.temperatures();
        let forecast = FORECAST_HOURS
            .iter()
            .enumerate()
            .map(|(i, hour)| (*hour, temp - 2 + (i as i32 % 4)))
            .collect();

        Self {
            city: city.to_string(),
            condition,
            temp,
            high,
            low,
            forecast,
        }
    }

    /// "Tokyo • ↑28° ↓18°"
    pub fn subtitle(&self) -> String {
        format!("{} • ↑{}° ↓{}°", self.city, self.high, self.low)
    }
}

pub struct WeatherPanel {
    city: String,
}

impl WeatherPanel {
    pub fn new(city: impl Into<String>) -> Self {
        Self { city: city.into() }
    }
}

impl PanelRenderer for WeatherPanel {
    fn title(&self) -> &str {
        "Weather"
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let report = WeatherReport::demo(&self.city, ctx.now.date_naive());

        let block = panel_block(self.title(), theme);
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Condition
                Constraint::Length(1), // Subtitle
                Constraint::Length(1), // Spacer
                Constraint::Min(1),    // Forecast
            ])
            .split(inner);

        let accent = report.condition.color(theme);
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {} ", report.condition.icon()),
                Style::default().fg(accent),
            ),
            Span::styled(
                format!("{}°", report.temp),
                Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", report.condition.label()),
                Style::default().fg(accent),
            ),
        ]))
        .render(chunks[0], buf);

        Paragraph::new(Line::from(Span::styled(
            format!(" {}", report.subtitle()),
            Style::default().fg(theme.grey2),
        )))
        .render(chunks[1], buf);

        let mut spans = vec![Span::raw(" ")];
        for (hour, temp) in &report.forecast {
            spans.push(Span::styled(
                format!("{:02}:00 ", hour),
                Style::default().fg(theme.grey1),
            ));
            spans.push(Span::styled(
                format!("{}°   ", temp),
                Style::default().fg(theme.fg0),
            ));
        }
        Paragraph::new(Line::from(spans)).render(chunks[3], buf);
    }
}
