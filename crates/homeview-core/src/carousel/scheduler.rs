use tracing::{debug, info};

use super::state::{CarouselState, PanelSpec};
use super::tracker::ScrollTarget;
use crate::surface::{scroll_to_item, DisplaySurface};
use crate::timer::{TimerHandle, TimerKind, TimerQueue};

/// Owns the carousel state and its auto-advance timer.
///
/// Every operation that touches the index or the pause/enable flags
/// re-evaluates the timer: the old handle is cancelled first, then a new
/// one is armed only if rotation is allowed. At most one auto-advance
/// timer is ever pending.
#[derive(Debug)]
pub struct RotationScheduler {
    panels: Vec<PanelSpec>,
    state: CarouselState,
}

impl RotationScheduler {
    pub fn new(panels: Vec<PanelSpec>, auto_rotate_enabled: bool) -> Self {
        Self {
            panels,
            state: CarouselState::new(auto_rotate_enabled),
        }
    }

    pub fn panels(&self) -> &[PanelSpec] {
        &self.panels
    }

    pub fn panel_count(&self) -> usize {
        self.panels.len()
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn current_panel(&self) -> Option<&PanelSpec> {
        self.panels.get(self.state.current_index)
    }

    pub fn auto_rotate_enabled(&self) -> bool {
        self.state.auto_rotate_enabled
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    /// Cancel any pending timer and arm a fresh one for the current panel
    /// if rotation is enabled and not paused.
    pub fn start(&mut self, timers: &mut TimerQueue) {
        timers.cancel_slot(&mut self.state.pending_timer);

        let Some(panel) = self.panels.get(self.state.current_index) else {
            return;
        };
        if !self.state.is_rotating() {
            return;
        }

        // A zero delay would re-fire at the same instant forever
        let delay_ms = panel.auto_advance_duration_ms.max(1);
        let handle = timers.schedule(delay_ms, TimerKind::AutoAdvance);
        self.state.pending_timer = Some(handle);
        debug!(
            panel = %panel.id,
            index = self.state.current_index,
            duration_ms = panel.auto_advance_duration_ms,
            "Rotation timer armed"
        );
    }

    /// Jump to `index` (clamped) and restart the timer from there
    pub fn advance_to(&mut self, index: usize, timers: &mut TimerQueue) {
        let count = self.panels.len();
        if count == 0 {
            return;
        }
        let index = index.min(count - 1);
        if index != self.state.current_index {
            debug!(from = self.state.current_index, to = index, "Panel index changed");
        }
        self.state.current_index = index;
        self.start(timers);
    }

    /// Suppress rotation until `resume`. Idempotent.
    pub fn pause(&mut self, timers: &mut TimerQueue) {
        self.state.paused = true;
        timers.cancel_slot(&mut self.state.pending_timer);
    }

    /// Lift a pause. Does nothing while auto-rotation is switched off.
    pub fn resume(&mut self, timers: &mut TimerQueue) {
        if !self.state.auto_rotate_enabled {
            return;
        }
        self.state.paused = false;
        self.start(timers);
    }

    pub fn set_auto_rotate_enabled(&mut self, enabled: bool, timers: &mut TimerQueue) {
        self.state.auto_rotate_enabled = enabled;
        info!("Auto-rotation {}", if enabled { "enabled" } else { "disabled" });
        if enabled {
            self.resume(timers);
        } else {
            timers.cancel_slot(&mut self.state.pending_timer);
        }
    }

    /// Cancel the pending timer without changing any flag
    pub fn cancel_timer(&mut self, timers: &mut TimerQueue) {
        timers.cancel_slot(&mut self.state.pending_timer);
    }

    /// Handle an auto-advance timer firing.
    ///
    /// Moves to the next panel (wrapping), asks the surface to scroll there
    /// and re-arms. Stale handles are ignored. Returns the new index.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        surface: &mut dyn DisplaySurface,
        timers: &mut TimerQueue,
    ) -> Option<usize> {
        if self.state.pending_timer != Some(handle) {
            return None;
        }
        self.state.pending_timer = None;

        let count = self.panels.len();
        if count == 0 {
            return None;
        }
        let next = (self.state.current_index + 1) % count;
        self.state.current_index = next;
        debug!(index = next, "Auto-advancing");
        scroll_to_item(surface, next);
        self.start(timers);
        Some(next)
    }
}

impl ScrollTarget for RotationScheduler {
    fn item_count(&self) -> usize {
        self.panels.len()
    }

    fn preempt(&mut self, timers: &mut TimerQueue) {
        self.cancel_timer(timers);
    }

    fn settle(&mut self, index: usize, timers: &mut TimerQueue) {
        if index != self.state.current_index {
            self.advance_to(index, timers);
        } else {
            self.start(timers);
        }
    }
}
