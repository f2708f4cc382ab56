// extensions/damping.rs
//
// Frame-rate independent exponential damping.
// Shared by the camera rig and node emphasis. No dependencies on scene state.

use glam::Vec3;

// ── Interpolation helpers ────────────────────────────────────────────────

/// Linearly interpolate between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Linearly interpolate between two Vec3 values.
#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

// ── Damping ──────────────────────────────────────────────────────────────

/// Fraction of the remaining distance to cover this step.
///
/// `smoothing` is the fraction kept per 60 Hz frame (0 snaps, 0.95 moves 5%
/// per frame). Raising it to `dt * 60` makes two 30 Hz steps land exactly
/// where four 60 Hz steps would.
#[inline]
pub fn damp_factor(smoothing: f32, dt: f32) -> f32 {
    if !(dt > 0.0) {
        return 0.0;
    }
    let smoothing = smoothing.clamp(0.0, 0.999);
    (1.0 - smoothing.powf(dt * 60.0)).clamp(0.0, 1.0)
}

/// Move `current` toward `target` by the damped fraction.
#[inline]
pub fn damp(current: f32, target: f32, smoothing: f32, dt: f32) -> f32 {
    lerp(current, target, damp_factor(smoothing, dt))
}

/// Vec3 version of [`damp`].
#[inline]
pub fn damp_vec3(current: Vec3, target: Vec3, smoothing: f32, dt: f32) -> Vec3 {
    lerp_vec3(current, target, damp_factor(smoothing, dt))
}
