//! Easing and interpolation helpers shared by every animation.

use glam::DVec3;

/// Ease-out cubic: `1 - (1 - t)³`, with `t` clamped to `[0, 1]`.
#[inline]
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two scene points.
#[inline]
pub fn lerp_point(a: DVec3, b: DVec3, t: f64) -> DVec3 {
    a * (1.0 - t) + b * t
}

/// Move `current` toward `target` by at most `step`, never overshooting.
///
/// Returns the new value and whether it changed.
#[inline]
pub fn step_toward(current: f64, target: f64, step: f64) -> (f64, bool) {
    if current < target {
        ((current + step).min(target), true)
    } else if current > target {
        ((current - step).max(target), true)
    } else {
        (current, false)
    }
}
