//! Pure easing curves mapping progress in [0, 1] to [0, 1].
//!
//! Shared by the liquid pagination pill and the terminal scroll animator.

/// Cubic ease-in: f(t) = t³
#[inline]
pub fn cubic_in(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * t
}

/// Cubic ease-out: f(t) = 1 - (1-t)³
#[inline]
pub fn cubic_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv
}

/// Quintic ease-out: f(t) = 1 - (1-t)⁵
#[inline]
pub fn quintic_out(t: f64) -> f64 {
    let inv = 1.0 - t.clamp(0.0, 1.0);
    1.0 - inv * inv * inv * inv * inv
}

/// Exponential ease-out: f(t) = 1 - 2^(-10t)
#[inline]
pub fn exponential_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t >= 1.0 {
        1.0
    } else {
        1.0 - 2.0_f64.powf(-10.0 * t)
    }
}

/// Mix an eased value with linear progress.
///
/// `weight` is the share of the eased curve; the rest is plain `t`.
#[inline]
pub fn blend(eased: f64, t: f64, weight: f64) -> f64 {
    weight * eased + (1.0 - weight) * t
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
