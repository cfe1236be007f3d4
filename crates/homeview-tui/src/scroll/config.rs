use std::time::Duration;

pub use homeview_core::{EasingType, ScrollConfig};

/// Derived timings and distances for the surfaces
pub trait ScrollConfigExt {
    /// Length of one programmatic or stepped transition
    fn transition(&self) -> Duration;

    /// Redraw interval while a surface is moving
    fn frame_interval(&self) -> Duration;

    /// False when transitions jump straight to their target
    fn animates(&self) -> bool;

    /// Cells a wheel gesture moves a surface. Horizontal swipes over the
    /// news strip travel twice as far since its cards are wide.
    fn wheel_distance(&self, notches: i8, horizontal: bool) -> f64;
}

impl ScrollConfigExt for ScrollConfig {
    fn transition(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    fn frame_interval(&self) -> Duration {
        match self.animation_fps {
            0 => Duration::from_millis(16),
            fps => Duration::from_millis(1000 / fps as u64),
        }
    }

    fn animates(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }

    fn wheel_distance(&self, notches: i8, horizontal: bool) -> f64 {
        let base = self.scroll_lines as f64 * notches as f64;
        if horizontal {
            base * 2.0
        } else {
            base
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_interval_from_fps() {
        let mut config = ScrollConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        config.animation_fps = 30;
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
        config.animation_fps = 0;
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
    }

    #[test]
    fn test_zero_duration_disables_animation() {
        let mut config = ScrollConfig::default();
        assert!(config.animates());
        config.animation_duration_ms = 0;
        assert!(!config.animates());
        config.animation_duration_ms = 400;
        config.smooth_enabled = false;
        assert!(!config.animates());
    }

    #[test]
    fn test_wheel_distance() {
        let config = ScrollConfig {
            scroll_lines: 3,
            ..ScrollConfig::default()
        };
        assert_eq!(config.wheel_distance(1, false), 3.0);
        assert_eq!(config.wheel_distance(-2, false), -6.0);
        assert_eq!(config.wheel_distance(1, true), 6.0);
    }
}
