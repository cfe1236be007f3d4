//! Interaction state machine sitting above the rotation scheduler.
//!
//! Generic activity (pointer, touch, wheel) pauses rotation and arms an idle
//! timer that resumes it. A long press toggles the auto-rotate master
//! switch. Switching rotation off also kills the idle timer, so an idle
//! elapse can never bring back rotation the user turned off.

use tracing::{debug, info};

use crate::carousel::RotationScheduler;
use crate::timer::{TimerHandle, TimerKind, TimerQueue};

/// Icon shown next to feedback text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackIcon {
    Play,
    Pause,
}

impl FeedbackIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            FeedbackIcon::Play => "▶",
            FeedbackIcon::Pause => "⏸",
        }
    }
}

/// Transient on-screen acknowledgement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub text: String,
    pub icon: FeedbackIcon,
}

impl Feedback {
    pub fn new(text: impl Into<String>, icon: FeedbackIcon) -> Self {
        Self {
            text: text.into(),
            icon,
        }
    }
}

/// Where acknowledgements end up on screen
pub trait FeedbackSink {
    fn show(&mut self, feedback: Feedback, timers: &mut TimerQueue);
}

#[derive(Debug)]
pub struct ActivityMonitor {
    idle_timeout_ms: u64,
    long_press_ms: u64,
    idle_timer: Option<TimerHandle>,
    long_press_timer: Option<TimerHandle>,
}

impl ActivityMonitor {
    pub fn new(idle_timeout_ms: u64, long_press_ms: u64) -> Self {
        Self {
            idle_timeout_ms,
            long_press_ms,
            idle_timer: None,
            long_press_timer: None,
        }
    }

    pub fn idle_timer(&self) -> Option<TimerHandle> {
        self.idle_timer
    }

    pub fn is_pressing(&self) -> bool {
        self.long_press_timer.is_some()
    }

    /// Someone touched, clicked, moved or scrolled
    pub fn on_activity(&mut self, scheduler: &mut RotationScheduler, timers: &mut TimerQueue) {
        scheduler.pause(timers);
        timers.cancel_slot(&mut self.idle_timer);
        if scheduler.auto_rotate_enabled() {
            self.idle_timer = Some(timers.schedule(self.idle_timeout_ms, TimerKind::IdleTimeout));
        }
    }

    /// Press went down; the toggle fires if it is held long enough
    pub fn on_press_start(&mut self, timers: &mut TimerQueue) {
        timers.cancel_slot(&mut self.long_press_timer);
        self.long_press_timer = Some(timers.schedule(self.long_press_ms, TimerKind::LongPress));
    }

    /// Press released; a short press changes nothing here
    pub fn on_press_end(&mut self, timers: &mut TimerQueue) {
        timers.cancel_slot(&mut self.long_press_timer);
    }

    /// Flip the auto-rotate switch and report it
    pub fn toggle_auto_rotate(
        &mut self,
        scheduler: &mut RotationScheduler,
        timers: &mut TimerQueue,
    ) -> Feedback {
        let enabled = !scheduler.auto_rotate_enabled();
        scheduler.set_auto_rotate_enabled(enabled, timers);

        if enabled {
            self.on_activity(scheduler, timers);
            Feedback::new("Rotation ON", FeedbackIcon::Play)
        } else {
            scheduler.pause(timers);
            timers.cancel_slot(&mut self.idle_timer);
            Feedback::new("Rotation OFF", FeedbackIcon::Pause)
        }
    }

    /// Route an idle or long-press timer. Returns feedback to display.
    pub fn on_timer(
        &mut self,
        handle: TimerHandle,
        kind: TimerKind,
        scheduler: &mut RotationScheduler,
        timers: &mut TimerQueue,
    ) -> Option<Feedback> {
        match kind {
            TimerKind::IdleTimeout if self.idle_timer == Some(handle) => {
                self.idle_timer = None;
                if !scheduler.auto_rotate_enabled() {
                    debug!("Idle elapsed with rotation off; staying paused");
                    return None;
                }
                info!("Idle timeout, resuming rotation");
                scheduler.resume(timers);
                Some(Feedback::new("Auto Resume", FeedbackIcon::Play))
            }
            TimerKind::LongPress if self.long_press_timer == Some(handle) => {
                self.long_press_timer = None;
                Some(self.toggle_auto_rotate(scheduler, timers))
            }
            _ => None,
        }
    }
}
