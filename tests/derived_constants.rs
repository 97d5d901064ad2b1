//! Flap strength and flight gravity across avatar sizes and settings.

use approx::assert_relative_eq;
use avatar_flight::anthropometry::BodyProportions;
use avatar_flight::profile::FlightProfile;
use avatar_flight::tuning::DerivedConstants;
use rstest::{fixture, rstest};

#[fixture]
fn profile() -> FlightProfile {
    FlightProfile::default()
}

fn body(armspan: f32) -> BodyProportions {
    BodyProportions {
        armspan,
        shoulder_distance: armspan * 0.4,
    }
}

#[rstest]
fn unit_armspan_uses_base_values(profile: FlightProfile) {
    let constants = DerivedConstants::compute(&profile, &body(1.0));
    assert_relative_eq!(constants.flap_strength, 285.0, epsilon = 1e-3);
    assert_relative_eq!(constants.flight_gravity, 0.4, epsilon = 1e-6);
}

#[rstest]
fn small_avatars_flap_harder(profile: FlightProfile) {
    let small = DerivedConstants::compute(&profile, &body(0.5));
    let large = DerivedConstants::compute(&profile, &body(3.0));
    assert!(small.flap_strength > large.flap_strength);
}

#[rstest]
fn ignoring_scale_matches_unit_armspan(mut profile: FlightProfile) {
    profile.use_avatar_scale = false;
    let tiny = DerivedConstants::compute(&profile, &body(0.1));
    assert_relative_eq!(tiny.normalized_size, 1.0);
    assert_relative_eq!(tiny.flap_strength, 285.0, epsilon = 1e-3);
}

#[rstest]
fn results_stay_non_negative(
    mut profile: FlightProfile,
    #[values(0.0, 0.05, 0.3, 1.0, 7.5, 20.0, 50.0)] armspan: f32,
    #[values(-30.0, 0.0, 10.0)] wingtip_offset: f32,
) {
    profile.wingtip_offset = wingtip_offset;
    let constants = DerivedConstants::compute(&profile, &body(armspan));
    assert!(constants.flap_strength >= 0.0);
    assert!(constants.flight_gravity >= 0.0);
}
