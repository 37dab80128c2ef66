//! Critically damped approach toward a target.
//!
//! A second-order smoothing step: the value moves toward the target with a
//! time constant and never overshoots it. The same step drives panel opacity
//! (scalar) and the camera rig (`Vec3`).

use glam::Vec3;

/// Smallest smoothing time accepted by the filter (seconds).
pub const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Exponential decay factor for one step, from a cubic approximation of
/// `e^-x` that stays stable for large steps.
#[inline]
fn decay(omega: f32, dt: f32) -> f32 {
    let x = omega * dt;
    1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x)
}

/// Advance `current` toward `target` by `dt` seconds.
///
/// `velocity` carries the filter state between calls and must be stored by
/// the caller. A non-positive (or NaN) `dt` returns `current` unchanged; an
/// infinite `dt` lands on `target`.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        return current;
    }
    if dt.is_infinite() {
        *velocity = 0.0;
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    // Passed the target this step (or the filter blew up): land on it and stop
    if !output.is_finite() || (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }

    output
}

/// Vector form of [`smooth_damp`].
///
/// Overshoot is detected along the direction of travel, so the result never
/// ends up beyond the target.
pub fn smooth_damp_vec3(
    current: Vec3,
    target: Vec3,
    velocity: &mut Vec3,
    smooth_time: f32,
    dt: f32,
) -> Vec3 {
    if dt.is_nan() || dt <= 0.0 {
        return current;
    }
    if dt.is_infinite() {
        *velocity = Vec3::ZERO;
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let exp = decay(omega, dt);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    if !output.is_finite() || (target - current).dot(output - target) > 0.0 {
        *velocity = Vec3::ZERO;
        return target;
    }

    output
}
