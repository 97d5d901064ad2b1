//! Per-avatar flight configuration.
//!
//! A [`FlightProfile`] holds every tunable that shapes how flight feels.
//! Profiles load from JSON with missing fields falling back to the
//! defaults, and [`FlightProfile::validate`] rejects values outside their
//! domain. Runtime modifiers go through [`FlightProfile::sanitised`]
//! instead, which clamps rather than fails.
use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::curve::ResponseCurve;

/// Allowed range of [`FlightProfile::flap_strength_base`].
pub const FLAP_STRENGTH_RANGE: RangeInclusive<i32> = 100..=800;
/// Allowed range of [`FlightProfile::fall_to_glide_activation_delay`].
pub const ACTIVATION_DELAY_RANGE: RangeInclusive<u32> = 1..=100;
/// Allowed range of [`FlightProfile::air_friction`].
pub const AIR_FRICTION_RANGE: RangeInclusive<f32> = 0.0..=0.2;
/// Allowed range of [`FlightProfile::weight`].
pub const WEIGHT_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Allowed range of [`FlightProfile::flap_delay`].
pub const FLAP_DELAY_RANGE: RangeInclusive<f32> = 0.0..=5.0;
/// Smallest usable [`FlightProfile::glide_control`].
pub const MIN_GLIDE_CONTROL: f32 = 1.0;

/// Reasons a profile is rejected.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Base flap strength outside `100..=800`.
    #[error("flap strength base {0} is outside 100..=800")]
    FlapStrengthOutOfRange(i32),
    /// Flight gravity base is negative.
    #[error("flight gravity base {0} must not be negative")]
    NegativeFlightGravity(f32),
    /// Fall-to-glide delay outside `1..=100` ticks.
    #[error("fall-to-glide activation delay {0} is outside 1..=100 ticks")]
    ActivationDelayOutOfRange(u32),
    /// Glide control below 1 makes turns degenerate.
    #[error("glide control {0} is below 1")]
    GlideControlBelowOne(f32),
    /// Air friction outside `0..=0.2`.
    #[error("air friction {0} is outside 0..=0.2")]
    AirFrictionOutOfRange(f32),
    /// Weight outside `0..=2`.
    #[error("weight {0} is outside 0..=2")]
    WeightOutOfRange(f32),
    /// Flap delay outside `0..=5` seconds.
    #[error("flap delay {0} is outside 0..=5 seconds")]
    FlapDelayOutOfRange(f32),
    /// A float field holds NaN or an infinity.
    #[error("{field} is not finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The profile file could not be read.
    #[error("failed to read profile {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
    /// The profile JSON is malformed.
    #[error("failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for one avatar's flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlightProfile {
    /// Base strength of a flap before the size curve is applied.
    pub flap_strength_base: i32,
    /// Base gravity while flying before the size curve is applied.
    pub flight_gravity_base: f32,
    /// Flaps only start while airborne.
    pub require_jump: bool,
    /// Keep walking and strafing while flying.
    pub allow_locomotion: bool,
    /// Apply weight and wingtip offset.
    pub use_avatar_modifiers: bool,
    /// Scale flight by the avatar's armspan.
    pub use_avatar_scale: bool,
    /// Allow gliding at all.
    pub can_glide: bool,
    /// Start flying when the glide pose is held during a long fall.
    pub fall_to_glide: bool,
    /// Falling ticks before a held glide pose takes off.
    pub fall_to_glide_activation_delay: u32,
    /// Pitch in degrees applied to each hand's forward when gliding.
    pub glide_angle_offset: f32,
    /// Seconds after a flap ends before another may start.
    pub flap_delay: f32,
    /// Armspan to flap-strength multiplier.
    pub size_curve: ResponseCurve,
    /// Multiplier on horizontal flap impulse while airborne.
    pub horizontal_strength_mod: f32,
    /// Rate at which a glide turns toward the wing direction.
    pub glide_control: f32,
    /// Fraction of glide speed lost per tick, before scaling.
    pub air_friction: f32,
    /// Use [`FlightProfile::gravity_curve`] for flight gravity.
    pub use_gravity_curve: bool,
    /// Armspan to flight-gravity multiplier.
    pub gravity_curve: ResponseCurve,
    /// Steer gliding by rotating the player instead of the wing direction.
    pub banking_turns: bool,
    /// Re-read world gravity and speeds at every take-off.
    pub dynamic_player_physics: bool,
    /// Show capability notifications.
    pub notifications: bool,
    /// Wing length bonus added to the flap strength.
    pub wingtip_offset: f32,
    /// Avatar heaviness; above 1 turns slower and falls faster.
    pub weight: f32,
}

impl Default for FlightProfile {
    fn default() -> Self {
        Self {
            flap_strength_base: 285,
            flight_gravity_base: 0.4,
            require_jump: true,
            allow_locomotion: false,
            use_avatar_modifiers: true,
            use_avatar_scale: true,
            can_glide: true,
            fall_to_glide: true,
            fall_to_glide_activation_delay: 20,
            glide_angle_offset: 0.0,
            flap_delay: 0.0,
            size_curve: ResponseCurve::default_size(),
            horizontal_strength_mod: 1.5,
            glide_control: 2.5,
            air_friction: 0.02,
            use_gravity_curve: false,
            gravity_curve: ResponseCurve::default_gravity(),
            banking_turns: true,
            dynamic_player_physics: false,
            notifications: true,
            wingtip_offset: 0.0,
            weight: 1.0,
        }
    }
}

impl FlightProfile {
    /// Parses a profile from JSON and validates it.
    ///
    /// # Errors
    /// Returns [`ProfileError::Parse`] for malformed JSON and any
    /// validation error from [`FlightProfile::validate`].
    ///
    /// # Examples
    ///
    /// ```
    /// use avatar_flight::profile::FlightProfile;
    /// let profile = FlightProfile::from_json_str(r#"{ "weight": 1.5 }"#)?;
    /// assert_eq!(profile.flap_strength_base, 285);
    /// # Ok::<(), avatar_flight::profile::ProfileError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, ProfileError> {
        let profile: Self = serde_json::from_str(json)?;
        profile.validate()?;
        Ok(profile)
    }

    /// Reads, parses and validates a profile file.
    ///
    /// # Errors
    /// Returns [`ProfileError::Io`] when the file cannot be read, otherwise
    /// the same errors as [`FlightProfile::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ProfileError> {
        let path_ref = path.as_ref();
        let json = fs::read_to_string(path_ref).map_err(|source| ProfileError::Io {
            path: path_ref.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every ranged field.
    ///
    /// # Errors
    /// Returns the first [`ProfileError`] found.
    pub fn validate(&self) -> Result<(), ProfileError> {
        for (field, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(ProfileError::NonFinite { field });
            }
        }
        if !FLAP_STRENGTH_RANGE.contains(&self.flap_strength_base) {
            return Err(ProfileError::FlapStrengthOutOfRange(self.flap_strength_base));
        }
        if self.flight_gravity_base < 0.0 {
            return Err(ProfileError::NegativeFlightGravity(self.flight_gravity_base));
        }
        if !ACTIVATION_DELAY_RANGE.contains(&self.fall_to_glide_activation_delay) {
            return Err(ProfileError::ActivationDelayOutOfRange(
                self.fall_to_glide_activation_delay,
            ));
        }
        if self.glide_control < MIN_GLIDE_CONTROL {
            return Err(ProfileError::GlideControlBelowOne(self.glide_control));
        }
        if !AIR_FRICTION_RANGE.contains(&self.air_friction) {
            return Err(ProfileError::AirFrictionOutOfRange(self.air_friction));
        }
        if !WEIGHT_RANGE.contains(&self.weight) {
            return Err(ProfileError::WeightOutOfRange(self.weight));
        }
        if !FLAP_DELAY_RANGE.contains(&self.flap_delay) {
            return Err(ProfileError::FlapDelayOutOfRange(self.flap_delay));
        }
        Ok(())
    }

    /// Returns a copy with every ranged field clamped into its domain.
    ///
    /// Non-finite floats fall back to their defaults.
    #[must_use]
    pub fn sanitised(&self) -> Self {
        let defaults = Self::default();
        Self {
            flap_strength_base: self
                .flap_strength_base
                .clamp(*FLAP_STRENGTH_RANGE.start(), *FLAP_STRENGTH_RANGE.end()),
            flight_gravity_base: finite_or(self.flight_gravity_base, defaults.flight_gravity_base)
                .max(0.0),
            fall_to_glide_activation_delay: self.fall_to_glide_activation_delay.clamp(
                *ACTIVATION_DELAY_RANGE.start(),
                *ACTIVATION_DELAY_RANGE.end(),
            ),
            glide_angle_offset: finite_or(self.glide_angle_offset, defaults.glide_angle_offset),
            flap_delay: clamp_into(self.flap_delay, defaults.flap_delay, &FLAP_DELAY_RANGE),
            horizontal_strength_mod: finite_or(
                self.horizontal_strength_mod,
                defaults.horizontal_strength_mod,
            ),
            glide_control: finite_or(self.glide_control, defaults.glide_control)
                .max(MIN_GLIDE_CONTROL),
            air_friction: clamp_into(self.air_friction, defaults.air_friction, &AIR_FRICTION_RANGE),
            wingtip_offset: finite_or(self.wingtip_offset, defaults.wingtip_offset),
            weight: clamp_into(self.weight, defaults.weight, &WEIGHT_RANGE),
            ..self.clone()
        }
    }

    fn float_fields(&self) -> [(&'static str, f32); 8] {
        [
            ("flight_gravity_base", self.flight_gravity_base),
            ("glide_angle_offset", self.glide_angle_offset),
            ("flap_delay", self.flap_delay),
            ("horizontal_strength_mod", self.horizontal_strength_mod),
            ("glide_control", self.glide_control),
            ("air_friction", self.air_friction),
            ("wingtip_offset", self.wingtip_offset),
            ("weight", self.weight),
        ]
    }
}

const fn finite_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

fn clamp_into(value: f32, fallback: f32, range: &RangeInclusive<f32>) -> f32 {
    finite_or(value, fallback).clamp(*range.start(), *range.end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn defaults_are_valid() {
        assert!(FlightProfile::default().validate().is_ok());
    }

    #[rstest]
    #[case::glide_control(FlightProfile { glide_control: 0.5, ..FlightProfile::default() })]
    #[case::flap_strength_low(FlightProfile { flap_strength_base: 99, ..FlightProfile::default() })]
    #[case::flap_strength_high(FlightProfile { flap_strength_base: 801, ..FlightProfile::default() })]
    #[case::air_friction(FlightProfile { air_friction: 0.3, ..FlightProfile::default() })]
    #[case::weight(FlightProfile { weight: -0.1, ..FlightProfile::default() })]
    #[case::delay(FlightProfile { fall_to_glide_activation_delay: 0, ..FlightProfile::default() })]
    #[case::gravity(FlightProfile { flight_gravity_base: -1.0, ..FlightProfile::default() })]
    #[case::flap_delay(FlightProfile { flap_delay: 9.0, ..FlightProfile::default() })]
    #[case::nan(FlightProfile { horizontal_strength_mod: f32::NAN, ..FlightProfile::default() })]
    fn rejects_out_of_domain_values(#[case] profile: FlightProfile) {
        assert!(profile.validate().is_err());
    }

    #[rstest]
    fn glide_control_below_one_is_named() {
        let profile = FlightProfile {
            glide_control: 0.99,
            ..FlightProfile::default()
        };
        assert!(matches!(
            profile.validate(),
            Err(ProfileError::GlideControlBelowOne(value)) if (value - 0.99).abs() < f32::EPSILON
        ));
    }

    #[rstest]
    fn sanitised_clamps_into_domain() {
        let wild = FlightProfile {
            flap_strength_base: 5_000,
            glide_control: 0.1,
            air_friction: f32::INFINITY,
            weight: 7.0,
            fall_to_glide_activation_delay: 0,
            ..FlightProfile::default()
        };
        let tame = wild.sanitised();
        assert_eq!(tame.flap_strength_base, 800);
        assert_relative_eq!(tame.glide_control, 1.0);
        assert_relative_eq!(tame.air_friction, 0.02);
        assert_relative_eq!(tame.weight, 2.0);
        assert_eq!(tame.fall_to_glide_activation_delay, 1);
        assert!(tame.validate().is_ok());
    }

    #[rstest]
    fn partial_json_keeps_defaults() {
        let profile = FlightProfile::from_json_str(r#"{ "banking_turns": false, "weight": 0.5 }"#)
            .expect("valid profile");
        assert!(!profile.banking_turns);
        assert_relative_eq!(profile.weight, 0.5);
        assert_eq!(profile.flap_strength_base, 285);
        assert_eq!(profile.size_curve, ResponseCurve::default_size());
    }

    #[rstest]
    fn json_out_of_domain_is_rejected() {
        let result = FlightProfile::from_json_str(r#"{ "glide_control": 0.2 }"#);
        assert!(matches!(result, Err(ProfileError::GlideControlBelowOne(_))));
    }

    #[rstest]
    fn malformed_json_is_a_parse_error() {
        let result = FlightProfile::from_json_str("{ weight: ");
        assert!(matches!(result, Err(ProfileError::Parse(_))));
    }

    #[rstest]
    fn missing_file_is_an_io_error() {
        let result = FlightProfile::from_json_file("/nonexistent/avatar_flight/profile.json");
        assert!(matches!(result, Err(ProfileError::Io { .. })));
    }
}
