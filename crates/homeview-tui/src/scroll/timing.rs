use std::time::{Duration, Instant};

/// Animation progress in [0, 1] at `now`
#[inline]
pub fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

/// Check if animation is complete at `now`
#[inline]
pub fn is_complete(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_midway() {
        let start = Instant::now();
        let p = progress(start, Duration::from_millis(400), start + Duration::from_millis(100));
        assert!((p - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_progress_zero_duration() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO, start) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_is_complete() {
        let start = Instant::now();
        let duration = Duration::from_millis(50);
        assert!(!is_complete(start, duration, start + Duration::from_millis(49)));
        assert!(is_complete(start, duration, start + duration));
    }
}
