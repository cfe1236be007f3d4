//! Scroll animation controller.
//!
//! Combines easing functions and timing utilities to move a scroll offset
//! towards a target over time. Call `scroll_to()` or `scroll_by()` to begin
//! an animation, then `update()` each frame to get the current offset.

use std::time::{Duration, Instant};

use homeview_core::easing::lerp;

use super::config::{ScrollConfig, ScrollConfigExt};
use super::easing::{EasingType, EasingTypeExt};
use super::timing::{is_complete, progress};

/// Active scroll animation state
#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: f64,
    to: f64,
    duration: Duration,
    easing: EasingType,
}

#[derive(Debug, Clone)]
pub struct ScrollAnimator {
    animation: Option<ActiveAnimation>,
    config: ScrollConfig,
    /// Current interpolated offset
    current: f64,
    /// Pending delta, batched until the next update
    pending_delta: f64,
}

impl Default for ScrollAnimator {
    fn default() -> Self {
        Self::new(ScrollConfig::default())
    }
}

impl ScrollAnimator {
    pub fn new(config: ScrollConfig) -> Self {
        Self {
            animation: None,
            config,
            current: 0.0,
            pending_delta: 0.0,
        }
    }

    pub fn config(&self) -> &ScrollConfig {
        &self.config
    }

    /// Check if an animation is currently active
    #[inline]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Check if there's pending work (animation or pending delta).
    /// Use this to determine if we need high frame rate.
    #[inline]
    pub fn needs_update(&self) -> bool {
        self.animation.is_some() || self.pending_delta != 0.0
    }

    /// Final offset once the running animation completes
    pub fn target(&self) -> f64 {
        self.animation.as_ref().map(|a| a.to).unwrap_or(self.current)
    }

    #[inline]
    pub fn current(&self) -> f64 {
        self.current
    }

    /// Set offset immediately (no animation)
    pub fn set_scroll(&mut self, offset: f64) {
        self.animation = None;
        self.current = offset;
        self.pending_delta = 0.0;
    }

    /// Start an animation to `target`, clamped into `[0, max]`.
    ///
    /// Jumps immediately when smooth scrolling is disabled. A running
    /// animation is replaced, starting from the current visible offset.
    pub fn scroll_to(&mut self, target: f64, max: f64) {
        self.scroll_to_at(target, max, Instant::now());
    }

    pub fn scroll_to_at(&mut self, target: f64, max: f64, now: Instant) {
        let target = target.clamp(0.0, max.max(0.0));
        self.pending_delta = 0.0;

        if !self.config.animates() {
            self.current = target;
            self.animation = None;
            return;
        }

        if (self.current - target).abs() < f64::EPSILON {
            self.animation = None;
            return;
        }

        self.animation = Some(ActiveAnimation {
            start: now,
            from: self.current,
            to: target,
            duration: self.config.transition(),
            easing: self.config.easing,
        });
    }

    /// Scroll by a delta (positive = forward).
    ///
    /// Multiple calls within one frame are batched together for smoother
    /// handling of rapid wheel notches and key repeats.
    pub fn scroll_by(&mut self, delta: f64, max: f64) {
        if !self.config.animates() {
            self.current = (self.current + delta).clamp(0.0, max.max(0.0));
            self.animation = None;
            return;
        }
        self.pending_delta += delta;
    }

    /// Advance the animation and return the current offset
    pub fn update(&mut self, max: f64) -> f64 {
        self.update_at(max, Instant::now())
    }

    pub fn update_at(&mut self, max: f64, now: Instant) -> f64 {
        let max = max.max(0.0);

        if self.pending_delta != 0.0 {
            let target = (self.target() + self.pending_delta).clamp(0.0, max);
            self.pending_delta = 0.0;
            if (target - self.current).abs() >= f64::EPSILON {
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to: target,
                    duration: self.config.transition(),
                    easing: self.config.easing,
                });
            }
        }

        if let Some(ref anim) = self.animation {
            if is_complete(anim.start, anim.duration, now) {
                self.current = anim.to.min(max);
                self.animation = None;
            } else {
                let t = anim.easing.apply(progress(anim.start, anim.duration, now));
                self.current = lerp(anim.from, anim.to, t).min(max);
            }
        }

        self.current
    }

    /// Stop at the current offset
    pub fn cancel(&mut self) {
        self.animation = None;
        self.pending_delta = 0.0;
    }
}
