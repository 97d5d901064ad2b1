//! Glide steering math.
//!
//! A glide never adds speed. The target velocity points along the wings
//! with the same magnitude as the incoming velocity, and the tick blends
//! toward it before air friction takes a small fraction off.
use glam::{Vec2, Vec3, Vec3Swizzles};

use crate::constants::{
    FLAP_IMPULSE_SCALE, HEAVY_GLIDE_CONTROL_PENALTY, VERTICAL_LOCK_MAX_Y, VERTICAL_LOCK_NUDGE,
};
use crate::numeric::round_to_tenth;
use crate::profile::FlightProfile;
use crate::vector_math::{clamp_magnitude, normalize_or_zero, slerp};

/// Velocity of the same speed as `velocity`, turned toward `wing_direction`.
///
/// The result's magnitude never exceeds the input's.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use avatar_flight::flight::glide::target_velocity;
/// let v = Vec3::new(0.0, -4.0, 0.0);
/// let target = target_velocity(v, Vec3::Z);
/// assert!(target.length() <= v.length() + 1e-5);
/// assert!(target.z > 0.0);
/// ```
#[must_use]
pub fn target_velocity(velocity: Vec3, wing_direction: Vec3) -> Vec3 {
    let speed = velocity.length();
    clamp_magnitude(velocity + normalize_or_zero(wing_direction) * speed, speed)
}

/// Gives a perfectly vertical slow velocity a small horizontal component
/// along the wings, so the glide turn has a direction to work with.
#[must_use]
pub fn unlock_vertical(velocity: Vec3, wing_direction: Vec3) -> Vec3 {
    if velocity.y >= VERTICAL_LOCK_MAX_Y || velocity.xz() != Vec2::ZERO {
        return velocity;
    }
    let nudge = wing_direction.xz().normalize_or_zero() * VERTICAL_LOCK_NUDGE;
    Vec3::new(round_to_tenth(nudge.x), velocity.y, round_to_tenth(nudge.y))
}

/// Turn rate for the profile, slowed for avatars heavier than 1.
#[must_use]
pub fn glide_control(profile: &FlightProfile) -> f32 {
    if profile.use_avatar_modifiers && profile.weight > 1.0 {
        profile.glide_control - (profile.weight - 1.0) * HEAVY_GLIDE_CONTROL_PENALTY
    } else {
        profile.glide_control
    }
}

/// Blends `velocity` toward `target` by `blend`, then applies air friction.
#[must_use]
pub fn blend_toward(velocity: Vec3, target: Vec3, blend: f32, air_friction: f32) -> Vec3 {
    slerp(velocity, target, blend) * (1.0 - air_friction * FLAP_IMPULSE_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::falling(Vec3::new(0.0, -6.0, 0.0), Vec3::Z)]
    #[case::opposed(Vec3::new(0.0, 0.0, 5.0), -Vec3::Z)]
    #[case::sideways(Vec3::new(3.0, -1.0, 2.0), Vec3::new(-0.3, 0.1, 0.9))]
    #[case::zero_wing(Vec3::new(1.0, -2.0, 0.5), Vec3::ZERO)]
    #[case::still(Vec3::ZERO, Vec3::X)]
    fn target_never_gains_speed(#[case] velocity: Vec3, #[case] wing: Vec3) {
        let target = target_velocity(velocity, wing);
        assert!(target.length() <= velocity.length() + 1e-5);
    }

    #[rstest]
    fn vertical_velocity_is_nudged_along_wings() {
        let fixed = unlock_vertical(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, -0.5, 2.0));
        assert_relative_eq!(fixed.x, 0.0);
        assert_relative_eq!(fixed.y, -3.0);
        assert_relative_eq!(fixed.z, 0.1, epsilon = 1e-6);
    }

    #[rstest]
    #[case::rising(Vec3::new(0.0, 0.5, 0.0))]
    #[case::moving(Vec3::new(0.01, -3.0, 0.0))]
    fn non_vertical_or_rising_is_untouched(#[case] velocity: Vec3) {
        assert_eq!(unlock_vertical(velocity, Vec3::Z), velocity);
    }

    #[rstest]
    #[case::light(1.0, true, 2.5)]
    #[case::heavy(2.0, true, 1.9)]
    #[case::heavy_without_modifiers(2.0, false, 2.5)]
    fn heavier_avatars_turn_slower(
        #[case] weight: f32,
        #[case] use_avatar_modifiers: bool,
        #[case] expected: f32,
    ) {
        let profile = FlightProfile {
            weight,
            use_avatar_modifiers,
            ..FlightProfile::default()
        };
        assert_relative_eq!(glide_control(&profile), expected, epsilon = 1e-6);
    }

    #[rstest]
    fn friction_trims_a_fraction() {
        let v = Vec3::new(0.0, 0.0, 10.0);
        let result = blend_toward(v, v, 0.5, 0.02);
        assert_relative_eq!(result.z, 10.0 * (1.0 - 0.02 * 0.011), epsilon = 1e-5);
    }
}
