//! Flap strength and flight gravity derived from the profile and body size.
use serde::Serialize;

use crate::anthropometry::BodyProportions;
use crate::constants::{UNMODIFIED_FLAP_BONUS, WINGTIP_FLAP_FACTOR};
use crate::numeric::setting_as_f32;
use crate::profile::FlightProfile;

/// Values the integrators need that depend on both the profile and the
/// current avatar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedConstants {
    /// Armspan used for curve lookups, or `1` when avatar scale is off.
    pub normalized_size: f32,
    /// Strength applied to hand displacement during a flap.
    pub flap_strength: f32,
    /// Gravity multiplier while flying.
    pub flight_gravity: f32,
}

impl DerivedConstants {
    /// Computes the constants for a profile and body.
    ///
    /// Both results are clamped to be non-negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use avatar_flight::anthropometry::BodyProportions;
    /// use avatar_flight::profile::FlightProfile;
    /// use avatar_flight::tuning::DerivedConstants;
    /// let constants = DerivedConstants::compute(
    ///     &FlightProfile::default(),
    ///     &BodyProportions::default(),
    /// );
    /// assert!((constants.flap_strength - 285.0).abs() < 1e-4);
    /// assert!((constants.flight_gravity - 0.4).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn compute(profile: &FlightProfile, body: &BodyProportions) -> Self {
        let normalized_size = if profile.use_avatar_scale {
            body.armspan
        } else {
            1.0
        };
        let size_factor = profile.size_curve.evaluate(normalized_size);

        let modifier = if profile.use_avatar_modifiers {
            profile.wingtip_offset * WINGTIP_FLAP_FACTOR
        } else {
            UNMODIFIED_FLAP_BONUS
        };
        let flap_base = setting_as_f32(profile.flap_strength_base);
        let flap_strength = size_factor * (flap_base + modifier);

        let base_gravity = if profile.use_gravity_curve {
            profile.gravity_curve.evaluate(normalized_size) * normalized_size
        } else {
            size_factor * profile.flight_gravity_base * normalized_size
        };
        let weight_factor = if profile.use_avatar_modifiers {
            profile.weight
        } else {
            1.0
        };

        Self {
            normalized_size,
            flap_strength: non_negative(flap_strength),
            flight_gravity: non_negative(base_gravity * weight_factor),
        }
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn body(armspan: f32) -> BodyProportions {
        BodyProportions {
            armspan,
            shoulder_distance: armspan * 0.4,
        }
    }

    #[rstest]
    fn modifiers_off_adds_flat_bonus() {
        let profile = FlightProfile {
            use_avatar_modifiers: false,
            weight: 2.0,
            ..FlightProfile::default()
        };
        let constants = DerivedConstants::compute(&profile, &body(1.0));
        assert_relative_eq!(constants.flap_strength, 295.0, epsilon = 1e-3);
        assert_relative_eq!(constants.flight_gravity, 0.4, epsilon = 1e-6);
    }

    #[rstest]
    fn wingtip_and_weight_apply_with_modifiers() {
        let profile = FlightProfile {
            wingtip_offset: 5.0,
            weight: 1.5,
            ..FlightProfile::default()
        };
        let constants = DerivedConstants::compute(&profile, &body(1.0));
        assert_relative_eq!(constants.flap_strength, 325.0, epsilon = 1e-3);
        assert_relative_eq!(constants.flight_gravity, 0.6, epsilon = 1e-6);
    }

    #[rstest]
    fn avatar_scale_off_ignores_armspan() {
        let profile = FlightProfile {
            use_avatar_scale: false,
            ..FlightProfile::default()
        };
        let constants = DerivedConstants::compute(&profile, &body(7.0));
        assert_relative_eq!(constants.normalized_size, 1.0);
        assert_relative_eq!(constants.flap_strength, 285.0, epsilon = 1e-3);
    }

    #[rstest]
    fn gravity_curve_replaces_size_curve() {
        let profile = FlightProfile {
            use_gravity_curve: true,
            ..FlightProfile::default()
        };
        let constants = DerivedConstants::compute(&profile, &body(1.0));
        assert_relative_eq!(constants.flight_gravity, 0.2, epsilon = 1e-6);
    }

    #[rstest]
    fn negative_wingtip_cannot_make_flaps_negative() {
        let profile = FlightProfile {
            wingtip_offset: -100.0,
            ..FlightProfile::default()
        };
        let constants = DerivedConstants::compute(&profile, &body(1.0));
        assert_relative_eq!(constants.flap_strength, 0.0);
    }

    #[rstest]
    fn degenerate_body_uses_curve_edge() {
        let constants = DerivedConstants::compute(&FlightProfile::default(), &body(0.0));
        assert_relative_eq!(constants.flap_strength, 570.0, epsilon = 1e-3);
        assert_relative_eq!(constants.flight_gravity, 0.0);
    }
}
