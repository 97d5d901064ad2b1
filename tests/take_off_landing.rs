//! Take-off and landing keep the saved world physics intact.

use avatar_flight::constants::IMMOBILISED_SPEED;
use avatar_flight::flight::FlightSimulation;
use avatar_flight::input::InputContext;
use avatar_flight::player::LocomotionSpeeds;
use avatar_flight::{FlightEvent, FlightProfile, HostPlayer};
use rstest::{fixture, rstest};

#[fixture]
fn player() -> HostPlayer {
    HostPlayer {
        gravity_strength: 1.0,
        locomotion: LocomotionSpeeds::default(),
        ..HostPlayer::default()
    }
}

fn enabled(profile: FlightProfile, player: &HostPlayer) -> FlightSimulation {
    let mut simulation = FlightSimulation::for_context(profile, InputContext::Immersive);
    simulation.enable(player);
    simulation
}

#[rstest]
fn second_take_off_is_ignored(mut player: HostPlayer) {
    let mut simulation = enabled(FlightProfile::default(), &player);
    assert!(simulation.take_off(&mut player));
    player.gravity_strength = 0.7;
    assert!(!simulation.take_off(&mut player));
    assert!((simulation.physics_snapshot().gravity - 1.0).abs() < f32::EPSILON);
    assert_eq!(simulation.drain_events(), vec![FlightEvent::FlyingChanged(true)]);
}

#[rstest]
fn take_off_lowers_gravity_and_speeds(mut player: HostPlayer) {
    let mut simulation = enabled(FlightProfile::default(), &player);
    simulation.take_off(&mut player);
    assert!((player.gravity_strength - 0.4).abs() < 1e-6);
    assert_eq!(player.locomotion, LocomotionSpeeds::uniform(IMMOBILISED_SPEED));
}

#[rstest]
fn landing_restores_saved_physics(mut player: HostPlayer) {
    let mut simulation = enabled(FlightProfile::default(), &player);
    simulation.take_off(&mut player);
    assert!(simulation.land(&mut player));
    assert!(!simulation.land(&mut player));
    assert!((player.gravity_strength - 1.0).abs() < f32::EPSILON);
    assert_eq!(player.locomotion, LocomotionSpeeds::default());
    assert_eq!(
        simulation.drain_events(),
        vec![FlightEvent::FlyingChanged(true), FlightEvent::FlyingChanged(false)]
    );
}

#[rstest]
fn locomotion_is_untouched_when_allowed(mut player: HostPlayer) {
    let profile = FlightProfile {
        allow_locomotion: true,
        ..FlightProfile::default()
    };
    let mut simulation = enabled(profile, &player);
    simulation.take_off(&mut player);
    assert_eq!(player.locomotion, LocomotionSpeeds::default());
}

#[rstest]
fn dynamic_physics_reads_gravity_at_take_off(mut player: HostPlayer) {
    let profile = FlightProfile {
        dynamic_player_physics: true,
        ..FlightProfile::default()
    };
    let mut simulation = enabled(profile, &player);
    player.gravity_strength = 2.0;
    simulation.take_off(&mut player);
    simulation.land(&mut player);
    assert!((player.gravity_strength - 2.0).abs() < f32::EPSILON);
}

#[rstest]
fn disabling_mid_flight_lands(mut player: HostPlayer) {
    let mut simulation = enabled(FlightProfile::default(), &player);
    simulation.take_off(&mut player);
    simulation.disable(&mut player);
    assert!(!simulation.is_enabled());
    assert!(!simulation.state().is_flying());
    assert!((player.gravity_strength - 1.0).abs() < f32::EPSILON);
}
