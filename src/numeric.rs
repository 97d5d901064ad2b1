//! Numeric helpers used across the project.
//!
//! These mirror the scalar behaviour of the host engine's math library so
//! tuned values keep the same feel: interpolation clamps its parameter,
//! rounding sends ties to even, and float-to-int conversion truncates.

/// Linear interpolation from `from` to `to` with `t` clamped to `[0, 1]`.
///
/// # Examples
///
/// ```
/// use avatar_flight::numeric::lerp_clamped;
/// assert!((lerp_clamped(0.0, 40.0, 0.25) - 10.0).abs() < f32::EPSILON);
/// assert!((lerp_clamped(0.0, 40.0, 3.0) - 40.0).abs() < f32::EPSILON);
/// ```
#[must_use]
pub fn lerp_clamped(from: f32, to: f32, t: f32) -> f32 {
    let clamped = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    from + (to - from) * clamped
}

/// Round to one decimal place, sending ties to the even neighbour.
#[must_use]
pub fn round_to_tenth(value: f32) -> f32 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Truncate a finite `f32` towards zero and convert it to `i32`.
///
/// Non-finite inputs map to `0`; out-of-range inputs saturate.
#[expect(
    clippy::cast_possible_truncation,
    reason = "Truncation towards zero is the intended conversion."
)]
#[must_use]
pub fn truncate_to_i32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    value.trunc() as i32
}

/// Convert a bounded integer setting into `f32`.
#[expect(
    clippy::cast_precision_loss,
    reason = "Integer settings are range-checked far below 2^24."
)]
#[must_use]
pub const fn setting_as_f32(value: i32) -> f32 {
    value as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::start(0.0, 100.0)]
    #[case::middle(0.5, 450.0)]
    #[case::end(1.0, 800.0)]
    #[case::below(-2.0, 100.0)]
    #[case::above(7.5, 800.0)]
    fn lerp_clamps_parameter(#[case] t: f32, #[case] expected: f32) {
        assert_relative_eq!(lerp_clamped(100.0, 800.0, t), expected);
    }

    #[rstest]
    fn lerp_treats_nan_as_start() {
        assert_relative_eq!(lerp_clamped(1.0, 2.0, f32::NAN), 1.0);
    }

    #[rstest]
    #[case(0.25, 0.2)]
    #[case(0.75, 0.8)]
    #[case(-0.25, -0.2)]
    #[case(1.44, 1.4)]
    #[case(0.0, 0.0)]
    fn rounds_ties_to_even(#[case] value: f32, #[case] expected: f32) {
        assert_relative_eq!(round_to_tenth(value), expected, epsilon = 1e-6);
    }

    #[rstest]
    #[case(449.9, 449)]
    #[case(-3.7, -3)]
    #[case(f32::NAN, 0)]
    #[case(f32::INFINITY, 0)]
    fn truncates_towards_zero(#[case] value: f32, #[case] expected: i32) {
        assert_eq!(truncate_to_i32(value), expected);
    }
}
