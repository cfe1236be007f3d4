use std::sync::Arc;
use std::time::Instant;

use chrono::Local;
use homeview_core::feed::Headline;
use homeview_core::storage::Note;
use homeview_core::{AppConfig, DisplaySurface, Kiosk, KioskEvent, ScrollChannel, Surfaces};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};
use tracing::debug;

use crate::input::{Action, MouseAction};
use crate::scroll::ScrollConfigExt;
use crate::panels::{
    CalendarPanel, NewsPanel, NotesPanel, PanelKind, PanelRenderer, PlaceholderPanel,
    RenderContext, WeatherPanel,
};
use crate::surface::ScrollSurface;
use crate::theme::Theme;
use crate::themes::load_theme;
use crate::widgets::{
    marker_at, marker_hit, render_scrolled, Axis, HeaderWidget, PaginationWidget,
    StatusBarWidget, ToastWidget,
};

/// Screen regions from the most recent layout pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    /// The scrolling panel stack
    pub stack: Rect,
    /// Column of panel dots right of the stack
    pub pagination: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(3),    // Panels
                Constraint::Length(1), // Status bar
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(10), Constraint::Length(3)])
            .split(rows[1]);

        Self {
            header: rows[0],
            stack: body[0],
            pagination: body[1],
            status: rows[2],
        }
    }
}

/// Application state
pub struct App {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Rotation engine
    pub kiosk: Kiosk,
    /// Panels in rotation order
    pub order: Vec<PanelKind>,
    pub weather: WeatherPanel,
    pub news: NewsPanel,
    pub calendar: CalendarPanel,
    pub notes: NotesPanel,
    /// Vertical stack of panels, one panel per page
    pub panel_surface: ScrollSurface,
    /// Horizontal strip of news cards
    pub news_surface: ScrollSurface,
    pub theme: Theme,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set when the user asks for fresh headlines; cleared by the run loop
    pub refresh_requested: bool,
    layout: ScreenLayout,
    started_at: Instant,
}

impl App {
    pub fn new(config: Arc<AppConfig>, notes: Vec<Note>) -> Self {
        let order: Vec<PanelKind> = config
            .carousel
            .panels
            .iter()
            .map(|p| PanelKind::from_id(&p.id))
            .collect();
        let scroll = config.ui.scroll.clone();

        Self {
            kiosk: Kiosk::new(&config),
            panel_surface: ScrollSurface::new(scroll.clone(), order.len()),
            news_surface: ScrollSurface::new(scroll, 0),
            order,
            weather: WeatherPanel::new(config.weather.city.clone()),
            news: NewsPanel::new(),
            calendar: CalendarPanel::new(),
            notes: NotesPanel::new(notes),
            theme: load_theme(&config.ui.theme),
            should_quit: false,
            refresh_requested: false,
            layout: ScreenLayout::default(),
            started_at: Instant::now(),
            config,
        }
    }

    /// Arm the rotation; call once before the first tick
    pub fn start(&mut self) {
        self.kiosk.start();
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    /// Whether a scroll animation wants a high frame rate
    pub fn is_animating(&self) -> bool {
        self.panel_surface.needs_update() || self.news_surface.needs_update()
    }

    fn send(&mut self, event: KioskEvent) -> bool {
        let mut surfaces = Surfaces {
            panels: &mut self.panel_surface,
            news: &mut self.news_surface,
        };
        self.kiosk.handle(event, &mut surfaces)
    }

    /// Fire due timers, then report surface movement as scroll samples.
    /// Returns true if a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let now_ms = now.saturating_duration_since(self.started_at).as_millis() as u64;
        let mut surfaces = Surfaces {
            panels: &mut self.panel_surface,
            news: &mut self.news_surface,
        };
        let mut changed = self.kiosk.tick(now_ms, &mut surfaces);

        if let Some(offset) = self.panel_surface.frame(now) {
            let extent = self.panel_surface.container_extent();
            self.send(KioskEvent::ScrollSample {
                channel: ScrollChannel::Panels,
                offset,
                extent,
            });
            changed = true;
        }
        if let Some(offset) = self.news_surface.frame(now) {
            let extent = self.news_surface.container_extent();
            self.send(KioskEvent::ScrollSample {
                channel: ScrollChannel::News,
                offset,
                extent,
            });
            changed = true;
        }
        changed
    }

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::None => {}
            Action::ToggleRotation => {
                self.send(KioskEvent::Activity);
                self.send(KioskEvent::ToggleAutoRotate);
            }
            Action::RefreshNews => {
                self.send(KioskEvent::Activity);
                self.refresh_requested = true;
            }
            Action::PanelNext => self.manual(|app| app.panel_surface.step(1)),
            Action::PanelPrev => self.manual(|app| app.panel_surface.step(-1)),
            Action::JumpToPanel(index) => {
                if index < self.order.len() {
                    self.send(KioskEvent::Activity);
                    self.send(KioskEvent::IndicatorClick { marker: index });
                }
            }
            Action::NewsNext => self.manual(|app| app.news_surface.step(1)),
            Action::NewsPrev => self.manual(|app| app.news_surface.step(-1)),
        }
    }

    /// User input that moves a surface counts as activity first
    fn manual(&mut self, scroll: impl FnOnce(&mut Self)) {
        self.send(KioskEvent::Activity);
        scroll(self);
    }

    pub fn handle_mouse(&mut self, action: MouseAction) {
        match action {
            MouseAction::Press { column, row } => {
                self.send(KioskEvent::Activity);
                self.send(KioskEvent::PressStart);
                if let Some(marker) = marker_at(self.layout.pagination, self.order.len(), column, row) {
                    self.send(KioskEvent::IndicatorClick { marker });
                } else if let Some(rail) = self.news_rail() {
                    if row == rail.y {
                        if let Some(marker) = marker_hit(rail, self.kiosk.news_pagination().layout(), column) {
                            self.send(KioskEvent::NewsIndicatorClick { marker });
                        }
                    }
                }
            }
            MouseAction::Release => {
                self.send(KioskEvent::PressEnd);
            }
            MouseAction::Wheel {
                column,
                row,
                delta,
                horizontal,
            } => {
                self.send(KioskEvent::Activity);
                let distance = self.config.ui.scroll.wheel_distance(delta, horizontal);
                let over_news = self
                    .news_cards()
                    .is_some_and(|cards| cards.contains((column, row).into()));
                if horizontal && over_news {
                    self.news_surface.scroll_by(distance);
                } else if !horizontal {
                    self.panel_surface.scroll_by(distance);
                }
            }
            MouseAction::Move => {
                self.send(KioskEvent::Activity);
            }
        }
    }

    /// Replace the news cards
    pub fn set_headlines(&mut self, headlines: Vec<Headline>) {
        let count = headlines.len();
        debug!(count, "Headlines updated");
        self.news.set_headlines(headlines);
        self.news_surface.set_item_count(count);
        self.send(KioskEvent::NewsItemsChanged { count });
    }

    pub fn set_notes(&mut self, notes: Vec<Note>) {
        self.notes.set_notes(notes);
    }

    /// Index of the news page in the stack, if any
    fn news_page(&self) -> Option<usize> {
        self.order.iter().position(|k| *k == PanelKind::News)
    }

    /// News card area when the news panel fills the stack
    fn news_cards(&self) -> Option<Rect> {
        let page = self.news_page()?;
        let (first, shift) = self.panel_surface.split_offset();
        (first == page && shift == 0).then(|| NewsPanel::regions(self.layout.stack).0)
    }

    /// News indicator row when the news panel is at rest on screen
    fn news_rail(&self) -> Option<Rect> {
        let page = self.news_page()?;
        let (first, _) = self.panel_surface.split_offset();
        (self.panel_surface.is_at_rest() && first == page)
            .then(|| NewsPanel::regions(self.layout.stack).1)
    }

    /// Recompute regions and push the new item sizes to the surfaces
    pub fn apply_layout(&mut self, area: Rect) {
        let layout = ScreenLayout::compute(area);
        if layout == self.layout {
            return;
        }
        self.layout = layout;
        self.panel_surface.set_extent(layout.stack.height as f64);
        let (cards, _) = NewsPanel::regions(layout.stack);
        self.news_surface.set_extent(cards.width as f64);
    }

    fn render_page(&self, index: usize, area: Rect, buf: &mut Buffer, ctx: &RenderContext<'_>) {
        match self.order.get(index) {
            Some(PanelKind::Weather) => self.weather.render(area, buf, ctx),
            Some(PanelKind::News) => self.news.render(area, buf, ctx),
            Some(PanelKind::Calendar) => self.calendar.render(area, buf, ctx),
            Some(PanelKind::Notes) => self.notes.render(area, buf, ctx),
            Some(PanelKind::Unknown(id)) => PlaceholderPanel::new(id.clone()).render(area, buf, ctx),
            None => {}
        }
    }

    fn current_title(&self) -> String {
        match self.order.get(self.kiosk.scheduler().current_index()) {
            Some(PanelKind::Weather) => self.weather.title().to_string(),
            Some(PanelKind::News) => self.news.title().to_string(),
            Some(PanelKind::Calendar) => self.calendar.title().to_string(),
            Some(PanelKind::Notes) => self.notes.title().to_string(),
            Some(PanelKind::Unknown(id)) => id.clone(),
            None => String::new(),
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        self.apply_layout(frame.area());
        let layout = self.layout;
        let now = Local::now();

        HeaderWidget::render(frame, layout.header, &now, &self.current_title(), &self.theme);

        let ctx = RenderContext {
            theme: &self.theme,
            now,
            news_surface: &self.news_surface,
            news_pagination: self.kiosk.news_pagination(),
        };
        let (first, shift) = self.panel_surface.split_offset();
        render_scrolled(
            layout.stack,
            frame.buffer_mut(),
            Axis::Vertical,
            first,
            shift,
            self.order.len(),
            |area, buf, index| self.render_page(index, area, buf, &ctx),
        );

        PaginationWidget::render(frame, layout.pagination, self.kiosk.pagination(), &self.theme);
        StatusBarWidget::render(frame, layout.status, self.kiosk.scheduler(), &self.theme);

        if let Some(feedback) = self.kiosk.feedback() {
            ToastWidget::render(frame, layout.stack, feedback, &self.theme);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homeview_core::feed::fallback_headlines;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.ui.scroll.smooth_enabled = false;
        let mut app = App::new(Arc::new(config), Vec::new());
        app.apply_layout(Rect::new(0, 0, 60, 20));
        app.start();
        app
    }

    fn at(app: &App, ms: u64) -> Instant {
        app.started_at() + Duration::from_millis(ms)
    }

    #[test]
    fn test_layout_regions() {
        let layout = ScreenLayout::compute(Rect::new(0, 0, 60, 20));
        assert_eq!(layout.header, Rect::new(0, 0, 60, 2));
        assert_eq!(layout.stack, Rect::new(0, 2, 57, 17));
        assert_eq!(layout.pagination, Rect::new(57, 2, 3, 17));
        assert_eq!(layout.status, Rect::new(0, 19, 60, 1));
    }

    #[test]
    fn test_auto_advance_moves_panel_surface() {
        let mut app = app();
        assert!(app.tick(at(&app, 15_000)));
        assert_eq!(app.kiosk.scheduler().current_index(), 1);
        assert_eq!(app.panel_surface.scroll_offset(), 17.0);
    }

    #[test]
    fn test_key_step_settles_through_tracker() {
        let mut app = app();
        app.handle_action(Action::PanelNext);
        app.handle_action(Action::PanelNext);
        assert!(app.kiosk.scheduler().is_paused());

        app.tick(at(&app, 10));
        app.tick(at(&app, 200));
        assert_eq!(app.kiosk.scheduler().current_index(), 2);
        assert_eq!(app.kiosk.pagination().active(), 2);
    }

    #[test]
    fn test_pagination_click_scrolls_stack() {
        let mut app = app();
        let dots = crate::widgets::marker_rects(app.layout().pagination, app.order.len());
        app.handle_mouse(MouseAction::Press {
            column: dots[3].x,
            row: dots[3].y,
        });
        app.handle_mouse(MouseAction::Release);

        app.tick(at(&app, 10));
        app.tick(at(&app, 200));
        assert_eq!(app.kiosk.scheduler().current_index(), 3);
        assert!(!app.kiosk.monitor().is_pressing());
    }

    #[test]
    fn test_toggle_shows_feedback() {
        let mut app = app();
        app.handle_action(Action::ToggleRotation);
        assert_eq!(
            app.kiosk.feedback().map(|f| f.text.as_str()),
            Some("Rotation OFF")
        );
        assert!(!app.kiosk.scheduler().auto_rotate_enabled());
    }

    #[test]
    fn test_headlines_feed_the_news_strip() {
        let mut app = app();
        app.set_headlines(fallback_headlines());
        assert_eq!(app.news_surface.item_count(), 3);
        assert_eq!(app.kiosk.news_strip().len(), 3);

        // Bring the news page on screen, then swipe one card
        app.handle_action(Action::JumpToPanel(1));
        app.tick(at(&app, 10));
        app.tick(at(&app, 200));
        app.handle_action(Action::NewsNext);
        app.tick(at(&app, 210));
        app.tick(at(&app, 400));
        assert_eq!(app.kiosk.news_strip().current(), 1);
        assert_eq!(app.kiosk.scheduler().current_index(), 1);
    }

    #[test]
    fn test_refresh_request_flag() {
        let mut app = app();
        app.handle_action(Action::RefreshNews);
        assert!(app.refresh_requested);
    }

    #[test]
    fn test_draw_smoke() {
        let mut app = app();
        app.set_headlines(fallback_headlines());
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();

        let buf = terminal.backend().buffer();
        let status: String = (0..60).map(|x| buf[(x, 19)].symbol().to_string()).collect();
        assert!(status.contains("AUTO"));
        assert!(status.contains("1/4 weather"));
    }
}
