//! Desktop players fly with buttons and steer with the head.

use avatar_flight::controller::FlightController;
use avatar_flight::gating::LogNotificationSink;
use avatar_flight::player::FlightButton;
use avatar_flight::{FlightEvent, FlightMode, FlightPhase, FlightProfile, InputContext};
use glam::Quat;
use rstest::{fixture, rstest};
use test_utils::{t_pose_player, Flyer};

#[fixture]
fn desktop() -> Flyer {
    let mut player = t_pose_player(1.0);
    player.in_vr = false;
    let controller = FlightController::new(
        FlightProfile::default(),
        FlightMode::On,
        Box::new(LogNotificationSink),
    );
    let mut flyer = Flyer::with_controller(controller, player);
    flyer.jump(3.0);
    flyer
}

#[rstest]
fn desktop_players_get_the_button_rig(desktop: Flyer) {
    assert_eq!(desktop.controller.simulation().input_context(), InputContext::Desktop);
    assert!(desktop.controller.eligibility().rigs().desktop());
}

#[rstest]
fn one_press_is_one_stroke(mut desktop: Flyer) {
    desktop.player.set_button(FlightButton::Flap, true);
    desktop.hold(12);
    assert_eq!(desktop.count(FlightEvent::FlappingChanged(true)), 1);
    assert_eq!(desktop.count(FlightEvent::FlappingChanged(false)), 1);
    assert_eq!(desktop.count(FlightEvent::FlyingChanged(true)), 1);
    assert!(desktop.player.velocity.y > 3.0);
}

#[rstest]
fn glide_button_glides_where_the_head_looks(mut desktop: Flyer) {
    desktop.player.set_button(FlightButton::Flap, true);
    desktop.hold(6);
    desktop.player.set_button(FlightButton::Flap, false);
    desktop.player.set_button(FlightButton::Glide, true);
    desktop.player.head.rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
    desktop.hold(40);
    assert_eq!(desktop.controller.simulation().phase(), FlightPhase::Gliding);
    assert!(desktop.controller.simulation().state().wing_direction().x > 0.9);
}
