//! The kiosk engine: one value owning every piece of rotation state.
//!
//! The UI loop feeds it input as [`KioskEvent`]s and the current time via
//! [`Kiosk::tick`]. Timers are dispatched one by one in deadline order and
//! each handler runs to completion before the next timer fires.

use tracing::{debug, info};

use crate::activity::{ActivityMonitor, Feedback, FeedbackSink};
use crate::carousel::{CardStrip, RotationScheduler, ScrollPositionTracker};
use crate::config::AppConfig;
use crate::pagination::{DiscretePagination, LiquidPagination, PaginationIndicator};
use crate::surface::Surfaces;
use crate::timer::{Fired, ScrollChannel, TimerHandle, TimerKind, TimerQueue};

/// Input the UI loop reports to the engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KioskEvent {
    /// A scroll container moved, whether dragged or animated
    ScrollSample {
        channel: ScrollChannel,
        offset: f64,
        extent: f64,
    },
    /// Pointer, touch, wheel or key input from a person
    Activity,
    PressStart,
    PressEnd,
    /// Marker of the panel indicator clicked
    IndicatorClick { marker: usize },
    /// Marker of the news indicator clicked
    NewsIndicatorClick { marker: usize },
    ToggleAutoRotate,
    /// The news card strip was repopulated
    NewsItemsChanged { count: usize },
}

/// Feedback popup with an auto-hide timer
#[derive(Debug)]
pub struct Toast {
    current: Option<Feedback>,
    hide_timer: Option<TimerHandle>,
    duration_ms: u64,
}

impl Toast {
    pub fn new(duration_ms: u64) -> Self {
        Self {
            current: None,
            hide_timer: None,
            duration_ms,
        }
    }

    pub fn current(&self) -> Option<&Feedback> {
        self.current.as_ref()
    }

    /// Hide if `handle` is the live hide timer
    fn on_timer(&mut self, handle: TimerHandle) -> bool {
        if self.hide_timer != Some(handle) {
            return false;
        }
        self.hide_timer = None;
        self.current = None;
        true
    }
}

impl FeedbackSink for Toast {
    fn show(&mut self, feedback: Feedback, timers: &mut TimerQueue) {
        info!(text = %feedback.text, "Feedback");
        timers.cancel_slot(&mut self.hide_timer);
        self.current = Some(feedback);
        self.hide_timer = Some(timers.schedule(self.duration_ms, TimerKind::FeedbackHide));
    }
}

#[derive(Debug)]
pub struct Kiosk {
    timers: TimerQueue,
    scheduler: RotationScheduler,
    panel_tracker: ScrollPositionTracker,
    pagination: DiscretePagination,
    news_tracker: ScrollPositionTracker,
    news_strip: CardStrip,
    news_pagination: LiquidPagination,
    monitor: ActivityMonitor,
    toast: Toast,
    clock_tick_ms: u64,
    clock_timer: Option<TimerHandle>,
}

impl Kiosk {
    pub fn new(config: &AppConfig) -> Self {
        let panels = config.carousel.panel_specs();
        let pagination = DiscretePagination::new(panels.len());
        let debounce_ms = config.carousel.debounce_ms;

        Self {
            timers: TimerQueue::new(),
            scheduler: RotationScheduler::new(panels, config.carousel.auto_rotate),
            panel_tracker: ScrollPositionTracker::new(ScrollChannel::Panels, debounce_ms),
            pagination,
            news_tracker: ScrollPositionTracker::new(ScrollChannel::News, debounce_ms),
            news_strip: CardStrip::new(0),
            news_pagination: LiquidPagination::new(0, config.pagination.clone()),
            monitor: ActivityMonitor::new(
                config.interaction.idle_timeout_ms,
                config.interaction.long_press_ms,
            ),
            toast: Toast::new(config.interaction.feedback_ms),
            clock_tick_ms: config.ui.clock_tick_ms,
            clock_timer: None,
        }
    }

    /// Arm the rotation and clock timers
    pub fn start(&mut self) {
        info!(
            panels = self.scheduler.panel_count(),
            auto_rotate = self.scheduler.auto_rotate_enabled(),
            "Starting kiosk"
        );
        self.scheduler.start(&mut self.timers);
        self.timers.cancel_slot(&mut self.clock_timer);
        self.clock_timer = Some(
            self.timers
                .schedule_repeating(self.clock_tick_ms, TimerKind::ClockTick),
        );
    }

    pub fn now(&self) -> u64 {
        self.timers.now()
    }

    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    pub fn scheduler(&self) -> &RotationScheduler {
        &self.scheduler
    }

    pub fn pagination(&self) -> &DiscretePagination {
        &self.pagination
    }

    pub fn news_strip(&self) -> &CardStrip {
        &self.news_strip
    }

    pub fn news_pagination(&self) -> &LiquidPagination {
        &self.news_pagination
    }

    pub fn monitor(&self) -> &ActivityMonitor {
        &self.monitor
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.toast.current()
    }

    /// Apply one input event. Returns true if anything visible changed.
    pub fn handle(&mut self, event: KioskEvent, surfaces: &mut Surfaces<'_>) -> bool {
        match event {
            KioskEvent::ScrollSample {
                channel: ScrollChannel::Panels,
                offset,
                extent,
            } => {
                self.panel_tracker.on_scroll_sample(
                    offset,
                    extent,
                    &mut self.scheduler,
                    &mut self.pagination,
                    &mut self.timers,
                );
                true
            }
            KioskEvent::ScrollSample {
                channel: ScrollChannel::News,
                offset,
                extent,
            } => {
                self.news_tracker.on_scroll_sample(
                    offset,
                    extent,
                    &mut self.news_strip,
                    &mut self.news_pagination,
                    &mut self.timers,
                );
                true
            }
            KioskEvent::Activity => {
                self.monitor.on_activity(&mut self.scheduler, &mut self.timers);
                false
            }
            KioskEvent::PressStart => {
                self.monitor.on_press_start(&mut self.timers);
                false
            }
            KioskEvent::PressEnd => {
                self.monitor.on_press_end(&mut self.timers);
                false
            }
            KioskEvent::IndicatorClick { marker } => {
                debug!(marker, "Panel marker clicked");
                self.pagination.handle_click(marker, &mut *surfaces.panels);
                false
            }
            KioskEvent::NewsIndicatorClick { marker } => {
                debug!(marker, "News marker clicked");
                self.news_pagination.handle_click(marker, &mut *surfaces.news);
                false
            }
            KioskEvent::ToggleAutoRotate => {
                let feedback = self
                    .monitor
                    .toggle_auto_rotate(&mut self.scheduler, &mut self.timers);
                self.toast.show(feedback, &mut self.timers);
                true
            }
            KioskEvent::NewsItemsChanged { count } => {
                self.news_tracker.reset(&mut self.timers);
                self.news_strip.set_len(count);
                self.news_pagination.set_item_count(count);
                self.news_pagination.render(self.news_strip.current() as f64);
                true
            }
        }
    }

    /// Fire every timer due at or before `now_ms`, then move the clock
    /// there. Returns true if anything visible changed.
    pub fn tick(&mut self, now_ms: u64, surfaces: &mut Surfaces<'_>) -> bool {
        let mut changed = false;
        while let Some(fired) = self.timers.pop_due(now_ms) {
            changed |= self.dispatch(fired, surfaces);
        }
        self.timers.set_now(now_ms);
        changed
    }

    fn dispatch(&mut self, fired: Fired, surfaces: &mut Surfaces<'_>) -> bool {
        match fired.kind {
            TimerKind::AutoAdvance => self
                .scheduler
                .on_timer(fired.handle, &mut *surfaces.panels, &mut self.timers)
                .is_some(),
            TimerKind::ScrollSettle(ScrollChannel::Panels) => {
                match self.panel_tracker.on_settle_timer(
                    fired.handle,
                    &mut self.scheduler,
                    &mut self.timers,
                ) {
                    Some(index) => {
                        self.pagination.set_active(index);
                        true
                    }
                    None => false,
                }
            }
            TimerKind::ScrollSettle(ScrollChannel::News) => {
                match self.news_tracker.on_settle_timer(
                    fired.handle,
                    &mut self.news_strip,
                    &mut self.timers,
                ) {
                    Some(index) => {
                        self.news_pagination.render(index as f64);
                        true
                    }
                    None => false,
                }
            }
            TimerKind::IdleTimeout | TimerKind::LongPress => {
                match self.monitor.on_timer(
                    fired.handle,
                    fired.kind,
                    &mut self.scheduler,
                    &mut self.timers,
                ) {
                    Some(feedback) => {
                        self.toast.show(feedback, &mut self.timers);
                        true
                    }
                    None => false,
                }
            }
            TimerKind::FeedbackHide => self.toast.on_timer(fired.handle),
            TimerKind::ClockTick => self.clock_timer == Some(fired.handle),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::FeedbackIcon;
    use crate::config::PanelConfig;
    use crate::surface::testing::RecordingSurface;

    fn config(durations: &[u64]) -> AppConfig {
        let mut config = AppConfig::default();
        config.carousel.panels = durations
            .iter()
            .enumerate()
            .map(|(i, d)| PanelConfig {
                id: format!("panel{}", i),
                duration_ms: *d,
            })
            .collect();
        config
    }

    struct Screens {
        panels: RecordingSurface,
        news: RecordingSurface,
    }

    impl Screens {
        fn new() -> Self {
            Self {
                panels: RecordingSurface::with_extent(100.0),
                news: RecordingSurface::with_extent(40.0),
            }
        }

        fn tick(&mut self, kiosk: &mut Kiosk, now_ms: u64) -> bool {
            let mut surfaces = Surfaces {
                panels: &mut self.panels,
                news: &mut self.news,
            };
            kiosk.tick(now_ms, &mut surfaces)
        }

        fn send(&mut self, kiosk: &mut Kiosk, event: KioskEvent) -> bool {
            let mut surfaces = Surfaces {
                panels: &mut self.panels,
                news: &mut self.news,
            };
            kiosk.handle(event, &mut surfaces)
        }
    }

    fn panel_sample(offset: f64) -> KioskEvent {
        KioskEvent::ScrollSample {
            channel: ScrollChannel::Panels,
            offset,
            extent: 100.0,
        }
    }

    #[test]
    fn test_two_panel_auto_advance() {
        let mut kiosk = Kiosk::new(&config(&[15_000, 20_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.tick(&mut kiosk, 14_999);
        assert_eq!(kiosk.scheduler().current_index(), 0);
        screens.tick(&mut kiosk, 15_000);
        assert_eq!(kiosk.scheduler().current_index(), 1);
        assert_eq!(screens.panels.requests, vec![100.0]);

        screens.tick(&mut kiosk, 35_000);
        assert_eq!(kiosk.scheduler().current_index(), 0);
        assert_eq!(screens.panels.requests, vec![100.0, 0.0]);
    }

    #[test]
    fn test_animated_advance_settles_and_restarts_clock() {
        let mut kiosk = Kiosk::new(&config(&[15_000, 20_000]));
        let mut screens = Screens::new();
        kiosk.start();
        screens.tick(&mut kiosk, 15_000);

        // The surface reports its animation back as samples
        for (at, offset) in [(15_050, 40.0), (15_120, 85.0), (15_190, 100.0)] {
            screens.tick(&mut kiosk, at);
            screens.send(&mut kiosk, panel_sample(offset));
        }
        assert_eq!(kiosk.timers().pending_count(TimerKind::AutoAdvance), 0);

        screens.tick(&mut kiosk, 15_289);
        assert_eq!(kiosk.timers().pending_count(TimerKind::AutoAdvance), 0);
        screens.tick(&mut kiosk, 15_290);
        assert_eq!(kiosk.scheduler().current_index(), 1);
        assert_eq!(kiosk.pagination().active(), 1);
        let handle = kiosk.scheduler().state().pending_timer.unwrap();
        assert_eq!(kiosk.timers().deadline(handle), Some(35_290));
    }

    #[test]
    fn test_manual_scroll_settles_to_rounded_index() {
        let mut kiosk = Kiosk::new(&config(&[10_000, 10_000, 10_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.send(&mut kiosk, KioskEvent::Activity);
        screens.send(&mut kiosk, panel_sample(150.0));
        assert!(screens.tick(&mut kiosk, 100));
        assert_eq!(kiosk.scheduler().current_index(), 2);
        assert_eq!(kiosk.pagination().active(), 2);
        // Still paused by the activity
        assert_eq!(kiosk.timers().pending_count(TimerKind::AutoAdvance), 0);
    }

    #[test]
    fn test_manual_scroll_clamps_to_last_panel() {
        let mut kiosk = Kiosk::new(&config(&[10_000, 10_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.send(&mut kiosk, panel_sample(150.0));
        screens.tick(&mut kiosk, 100);
        assert_eq!(kiosk.scheduler().current_index(), 1);
    }

    #[test]
    fn test_long_press_off_survives_idle() {
        let mut kiosk = Kiosk::new(&config(&[15_000, 20_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.send(&mut kiosk, KioskEvent::Activity);
        screens.send(&mut kiosk, KioskEvent::PressStart);
        screens.tick(&mut kiosk, 1_000);
        assert_eq!(
            kiosk.feedback(),
            Some(&Feedback::new("Rotation OFF", FeedbackIcon::Pause))
        );

        screens.tick(&mut kiosk, 3_000);
        assert!(kiosk.feedback().is_none());

        screens.tick(&mut kiosk, 120_000);
        assert!(!kiosk.scheduler().auto_rotate_enabled());
        assert_eq!(kiosk.scheduler().current_index(), 0);
        assert!(kiosk.feedback().is_none());
    }

    #[test]
    fn test_idle_resume_shows_feedback() {
        let mut kiosk = Kiosk::new(&config(&[15_000, 20_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.tick(&mut kiosk, 5_000);
        screens.send(&mut kiosk, KioskEvent::Activity);
        screens.tick(&mut kiosk, 35_000);

        assert_eq!(kiosk.feedback().map(|f| f.text.as_str()), Some("Auto Resume"));
        assert!(!kiosk.scheduler().is_paused());
        let handle = kiosk.scheduler().state().pending_timer.unwrap();
        assert_eq!(kiosk.timers().deadline(handle), Some(50_000));
    }

    #[test]
    fn test_indicator_click_goes_through_surface() {
        let mut kiosk = Kiosk::new(&config(&[10_000, 10_000, 10_000]));
        let mut screens = Screens::new();

        screens.send(&mut kiosk, KioskEvent::IndicatorClick { marker: 2 });
        assert_eq!(screens.panels.requests, vec![200.0]);
        assert_eq!(kiosk.scheduler().current_index(), 0);
    }

    #[test]
    fn test_news_strip_tracks_samples() {
        let mut kiosk = Kiosk::new(&config(&[10_000]));
        let mut screens = Screens::new();
        kiosk.start();

        screens.send(&mut kiosk, KioskEvent::NewsItemsChanged { count: 5 });
        assert_eq!(kiosk.news_pagination().marker_count(), 5);

        screens.send(
            &mut kiosk,
            KioskEvent::ScrollSample {
                channel: ScrollChannel::News,
                offset: 130.0,
                extent: 40.0,
            },
        );
        screens.tick(&mut kiosk, 100);
        assert_eq!(kiosk.news_strip().current(), 3);
        assert_eq!(kiosk.news_pagination().state().scroll_progress, 3.0);
        // News scrolling leaves the panel clock alone
        assert_eq!(kiosk.timers().pending_count(TimerKind::AutoAdvance), 1);

        screens.send(&mut kiosk, KioskEvent::NewsIndicatorClick { marker: 1 });
        assert_eq!(screens.news.requests, vec![40.0]);
    }

    #[test]
    fn test_clock_ticks_request_redraw() {
        let mut kiosk = Kiosk::new(&config(&[60_000]));
        let mut screens = Screens::new();
        kiosk.start();

        assert!(!screens.tick(&mut kiosk, 999));
        assert!(screens.tick(&mut kiosk, 1_000));
        assert_eq!(kiosk.now(), 1_000);
    }

    #[test]
    fn test_zero_duration_panels_do_not_stall_tick() {
        let mut kiosk = Kiosk::new(&config(&[0, 0]));
        let mut screens = Screens::new();
        kiosk.start();

        assert!(!screens.tick(&mut kiosk, 0));
        assert!(screens.tick(&mut kiosk, 4));
        assert_eq!(screens.panels.requests, vec![100.0, 0.0, 100.0, 0.0]);
        assert_eq!(kiosk.scheduler().current_index(), 0);
        assert_eq!(kiosk.timers().pending_count(TimerKind::AutoAdvance), 1);
    }
}
