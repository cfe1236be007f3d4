use homeview_core::feed::Headline;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use super::{panel_block, PanelRenderer, RenderContext};
use crate::theme::Theme;
use crate::widgets::{render_scrolled, Axis, LiquidRail};

const PREVIEW_CHARS: usize = 140;

/// Split the inner news area into the card strip and the indicator rail
pub fn news_layout(inner: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(inner);
    (chunks[0], chunks[1])
}

/// Horizontal strip of headline cards with a liquid indicator underneath
#[derive(Default)]
pub struct NewsPanel {
    /// None until the first fetch completes
    headlines: Option<Vec<Headline>>,
}

impl NewsPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_headlines(&mut self, headlines: Vec<Headline>) {
        self.headlines = Some(headlines);
    }

    pub fn headlines(&self) -> &[Headline] {
        self.headlines.as_deref().unwrap_or_default()
    }

    pub fn is_loading(&self) -> bool {
        self.headlines.is_none()
    }

    /// Where the card strip and the rail end up when the panel fills `area`
    pub fn regions(area: Rect) -> (Rect, Rect) {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        news_layout(inner)
    }
}

fn render_card(headline: &Headline, area: Rect, buf: &mut Buffer, theme: &Theme) {
    let card = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.bg2))
        .style(Style::default().bg(theme.bg1));
    let inner = card.inner(area);
    card.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    let body = vec![
        Line::from(Span::styled(
            headline.title.clone(),
            Style::default().fg(theme.fg1).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            headline.description_preview(PREVIEW_CHARS),
            Style::default().fg(theme.grey2),
        )),
    ];
    Paragraph::new(body)
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    let time = headline.time_label();
    let footer = if time.is_empty() {
        headline.source.clone()
    } else {
        format!("{} • {}", headline.source, time)
    };
    Paragraph::new(Line::from(Span::styled(footer, Style::default().fg(theme.aqua))))
        .alignment(Alignment::Right)
        .render(chunks[1], buf);
}

impl PanelRenderer for NewsPanel {
    fn title(&self) -> &str {
        "News"
    }

    fn render(&self, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        let theme = ctx.theme;
        let block = panel_block(self.title(), theme);
        block.render(area, buf);
        let (cards, rail) = Self::regions(area);

        let headlines = match &self.headlines {
            Some(headlines) if !headlines.is_empty() => headlines,
            _ => {
                Paragraph::new(Line::from(Span::styled(
                    "Loading News...",
                    Style::default().fg(theme.grey1),
                )))
                .alignment(Alignment::Center)
                .render(cards, buf);
                return;
            }
        };

        let (first, shift) = ctx.news_surface.split_offset();
        render_scrolled(
            cards,
            buf,
            Axis::Horizontal,
            first,
            shift,
            headlines.len(),
            |card_area, card_buf, index| render_card(&headlines[index], card_area, card_buf, theme),
        );

        LiquidRail::new(ctx.news_pagination.layout(), theme).render(rail, buf);
    }
}
