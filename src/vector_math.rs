//! Vector helpers shared by the flap and glide integrators.
//!
//! The glide turn relies on a spherical interpolation that blends both the
//! direction and the length of two vectors, which `glam` does not provide
//! for `Vec3`. The helpers here also guard against non-finite input so a
//! bad tracking sample cannot poison the player's velocity.
use glam::{Quat, Vec2, Vec3};

/// Below this length a vector has no usable direction.
const DIRECTION_EPSILON: f32 = 1e-6;

/// Returns the unit vector along `vector`, or zero when it has no direction.
///
/// Non-finite input also yields zero.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use avatar_flight::vector_math::normalize_or_zero;
/// assert_eq!(normalize_or_zero(Vec3::new(3.0, 0.0, 0.0)), Vec3::X);
/// assert_eq!(normalize_or_zero(Vec3::ZERO), Vec3::ZERO);
/// assert_eq!(normalize_or_zero(Vec3::new(f32::NAN, 1.0, 0.0)), Vec3::ZERO);
/// ```
#[must_use]
pub fn normalize_or_zero(vector: Vec3) -> Vec3 {
    if !vector.is_finite() {
        return Vec3::ZERO;
    }
    vector.try_normalize().unwrap_or(Vec3::ZERO)
}

/// Shortens `vector` to `max_length` when it is longer, keeping its direction.
#[must_use]
pub fn clamp_magnitude(vector: Vec3, max_length: f32) -> Vec3 {
    let length_squared = vector.length_squared();
    if length_squared > max_length * max_length {
        normalize_or_zero(vector) * max_length
    } else {
        vector
    }
}

/// Distance between two points projected on the horizontal plane.
#[must_use]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    Vec2::new(a.x, a.z).distance(Vec2::new(b.x, b.z))
}

/// Spherically interpolates between `from` and `to`.
///
/// The direction rotates along the great circle joining the two vectors
/// while the length is interpolated linearly. `t` is clamped to `[0, 1]`.
/// Zero-length or parallel inputs fall back to a linear blend, and
/// opposite inputs rotate about an arbitrary perpendicular axis.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use avatar_flight::vector_math::slerp;
/// let halfway = slerp(Vec3::X, Vec3::Z * 3.0, 0.5);
/// assert!((halfway.length() - 2.0).abs() < 1e-5);
/// assert!((halfway.x - halfway.z).abs() < 1e-5);
/// ```
#[must_use]
pub fn slerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let blend = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let from_length = from.length();
    let to_length = to.length();
    if from_length < DIRECTION_EPSILON || to_length < DIRECTION_EPSILON {
        return from.lerp(to, blend);
    }

    let length = from_length + (to_length - from_length) * blend;
    let from_unit = from / from_length;
    let cosine = from.dot(to) / (from_length * to_length);

    if cosine > 1.0 - DIRECTION_EPSILON {
        return from.lerp(to, blend);
    }

    let rotation = if cosine < -1.0 + DIRECTION_EPSILON {
        Quat::from_axis_angle(from_unit.any_orthonormal_vector(), std::f32::consts::PI * blend)
    } else {
        let axis = from.cross(to).normalize();
        Quat::from_axis_angle(axis, cosine.acos() * blend)
    };
    rotation * from_unit * length
}

/// Rotates `point` about `pivot` by `rotation`.
#[must_use]
pub fn rotate_about(point: Vec3, pivot: Vec3, rotation: Quat) -> Vec3 {
    pivot + rotation * (point - pivot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn clamp_magnitude_shortens_long_vectors() {
        let clamped = clamp_magnitude(Vec3::new(0.0, 6.0, 8.0), 5.0);
        assert_relative_eq!(clamped.length(), 5.0, epsilon = 1e-5);
        assert_relative_eq!(clamped.y / clamped.z, 0.75, epsilon = 1e-5);
    }

    #[rstest]
    fn clamp_magnitude_keeps_short_vectors() {
        let vector = Vec3::new(1.0, 2.0, 2.0);
        assert_eq!(clamp_magnitude(vector, 3.5), vector);
    }

    #[rstest]
    fn horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 100.0, 0.0);
        let b = Vec3::new(3.0, -20.0, 4.0);
        assert_relative_eq!(horizontal_distance(a, b), 5.0);
    }

    #[rstest]
    #[case::start(0.0, Vec3::X)]
    #[case::end(1.0, Vec3::Y)]
    #[case::clamped_low(-1.0, Vec3::X)]
    #[case::clamped_high(2.0, Vec3::Y)]
    fn slerp_hits_endpoints(#[case] t: f32, #[case] expected: Vec3) {
        let result = slerp(Vec3::X, Vec3::Y, t);
        assert_relative_eq!(result.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(result.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(result.z, expected.z, epsilon = 1e-5);
    }

    #[rstest]
    fn slerp_keeps_unit_length_between_unit_vectors() {
        for step in 0_u8..=10 {
            let t = f32::from(step) / 10.0;
            assert_relative_eq!(slerp(Vec3::X, Vec3::Z, t).length(), 1.0, epsilon = 1e-5);
        }
    }

    #[rstest]
    fn slerp_handles_opposite_vectors() {
        let halfway = slerp(Vec3::X, -Vec3::X, 0.5);
        assert_relative_eq!(halfway.length(), 1.0, epsilon = 1e-5);
        assert_relative_eq!(halfway.dot(Vec3::X), 0.0, epsilon = 1e-5);
    }

    #[rstest]
    fn slerp_from_zero_is_linear() {
        let result = slerp(Vec3::ZERO, Vec3::new(0.0, 0.0, 4.0), 0.25);
        assert_relative_eq!(result.z, 1.0, epsilon = 1e-6);
    }

    #[rstest]
    fn rotate_about_orbits_the_pivot() {
        let pivot = Vec3::new(1.0, 0.0, 1.0);
        let rotated = rotate_about(
            Vec3::new(2.0, 0.0, 1.0),
            pivot,
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        );
        assert_relative_eq!(rotated.distance(pivot), 1.0, epsilon = 1e-5);
        assert_relative_eq!(rotated.x, 1.0, epsilon = 1e-5);
    }
}
