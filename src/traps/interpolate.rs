//! Traps domain: linear interpolation between two positions.

use bevy::math::Vec2;

/// Position along `start -> end` after `elapsed` out of `duration` seconds.
///
/// The progress is clamped to `[0, 1]`. A duration that is zero, negative or
/// not finite lands on `end` straight away.
pub fn position_at(start: Vec2, end: Vec2, elapsed: f32, duration: f32) -> Vec2 {
    if !duration.is_finite() || duration <= 0.0 {
        return end;
    }

    let progress = (elapsed / duration).clamp(0.0, 1.0);
    if progress.is_nan() {
        return end;
    }

    start + (end - start) * progress
}
