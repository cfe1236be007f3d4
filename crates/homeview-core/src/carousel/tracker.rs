use tracing::{debug, trace};

use crate::pagination::PaginationIndicator;
use crate::timer::{ScrollChannel, TimerHandle, TimerKind, TimerQueue};

/// Something whose index is reconciled with a scroll container
pub trait ScrollTarget {
    /// Number of items laid out in the container
    fn item_count(&self) -> usize;

    /// Manual scrolling started or continued; stop any clock
    fn preempt(&mut self, timers: &mut TimerQueue);

    /// The container came to rest on `index` (already clamped)
    fn settle(&mut self, index: usize, timers: &mut TimerQueue);
}

/// One burst of scroll samples between two settles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSession {
    pub debounce: TimerHandle,
    pub last_offset: f64,
    pub last_extent: f64,
}

impl ScrollSession {
    pub fn progress(&self) -> f64 {
        progress(self.last_offset, self.last_extent)
    }
}

fn progress(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 && offset.is_finite() {
        offset / extent
    } else {
        0.0
    }
}

/// Turns a stream of raw scroll offsets into one settled index per gesture.
///
/// Every sample preempts the target's clock and forwards fractional progress
/// to the indicator; only the last sample of a burst, once the debounce
/// delay passes quietly, settles an index.
#[derive(Debug)]
pub struct ScrollPositionTracker {
    channel: ScrollChannel,
    debounce_ms: u64,
    session: Option<ScrollSession>,
    last_progress: f64,
}

impl ScrollPositionTracker {
    pub fn new(channel: ScrollChannel, debounce_ms: u64) -> Self {
        Self {
            channel,
            debounce_ms,
            session: None,
            last_progress: 0.0,
        }
    }

    pub fn channel(&self) -> ScrollChannel {
        self.channel
    }

    pub fn session(&self) -> Option<&ScrollSession> {
        self.session.as_ref()
    }

    /// Fractional position of the most recent sample
    pub fn progress(&self) -> f64 {
        self.last_progress
    }

    pub fn on_scroll_sample(
        &mut self,
        raw_offset: f64,
        container_extent: f64,
        target: &mut dyn ScrollTarget,
        indicator: &mut dyn PaginationIndicator,
        timers: &mut TimerQueue,
    ) {
        target.preempt(timers);

        let progress = progress(raw_offset, container_extent);
        self.last_progress = progress;
        indicator.render(progress);

        if let Some(session) = self.session.take() {
            timers.cancel(session.debounce);
        }
        let debounce = timers.schedule(self.debounce_ms, TimerKind::ScrollSettle(self.channel));
        self.session = Some(ScrollSession {
            debounce,
            last_offset: raw_offset,
            last_extent: container_extent,
        });
        trace!(channel = ?self.channel, raw_offset, progress, "Scroll sample");
    }

    /// Handle the debounce timer firing. Returns the settled index.
    pub fn on_settle_timer(
        &mut self,
        handle: TimerHandle,
        target: &mut dyn ScrollTarget,
        timers: &mut TimerQueue,
    ) -> Option<usize> {
        match self.session {
            Some(session) if session.debounce == handle => {}
            _ => return None,
        }
        let session = self.session.take()?;

        let count = target.item_count();
        if count == 0 {
            return None;
        }
        let rounded = session.progress().round().max(0.0) as usize;
        let index = rounded.min(count - 1);
        debug!(channel = ?self.channel, index, "Scroll settled");
        target.settle(index, timers);
        Some(index)
    }

    /// Drop an in-flight gesture without settling
    pub fn reset(&mut self, timers: &mut TimerQueue) {
        if let Some(session) = self.session.take() {
            timers.cancel(session.debounce);
        }
    }
}
