//! Velocity produced by one tick of a wing stroke.
use glam::Vec3;

use crate::constants::{FLAP_AIR_FRICTION, FLAP_IMPULSE_SCALE, FLAP_SPEED_CAP_FACTOR};
use crate::vector_math::normalize_or_zero;

/// Adds the stroke impulse to `velocity`.
///
/// Grounded strokes only push upward so players cannot skate along the
/// floor. Airborne strokes scale their horizontal part by
/// `horizontal_strength_mod`. Above `0.02 * flap_strength` the result loses
/// a fixed amount of speed, which softly limits how fast flapping gets.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use avatar_flight::flight::flap::stroke_velocity;
/// let v = stroke_velocity(Vec3::ZERO, Vec3::new(0.5, 0.2, 0.0), true, 285.0, 1.5);
/// assert_eq!(v.x, 0.0);
/// assert!((v.y - 0.011 * 285.0 * 0.2).abs() < 1e-5);
/// ```
#[must_use]
pub fn stroke_velocity(
    velocity: Vec3,
    displacement: Vec3,
    grounded: bool,
    flap_strength: f32,
    horizontal_strength_mod: f32,
) -> Vec3 {
    let raw = displacement * (FLAP_IMPULSE_SCALE * flap_strength);
    let impulse = if grounded {
        Vec3::new(0.0, raw.y, 0.0)
    } else {
        raw * Vec3::new(horizontal_strength_mod, 1.0, horizontal_strength_mod)
    };

    let stroked = velocity + impulse;
    let speed = stroked.length();
    if speed > FLAP_SPEED_CAP_FACTOR * flap_strength {
        let friction = FLAP_AIR_FRICTION * flap_strength * FLAP_IMPULSE_SCALE;
        normalize_or_zero(stroked) * (speed - friction)
    } else {
        stroked
    }
}
