//! Per-frame play-space rotation while banking.
//!
//! Rotating the player directly fights the headset, so the play-space
//! origin orbits the player instead and the player is realigned to it.
use glam::Quat;

use super::state::BankingState;
use crate::constants::BANKING_RESPONSE;
use crate::player::{PlayerApi, TrackingPoint};
use crate::profile::FlightProfile;
use crate::vector_math::rotate_about;

impl BankingState {
    /// Eases the rotation speed toward its goal over `dt` seconds.
    ///
    /// Avatar modifiers make heavier avatars respond more slowly.
    pub fn approach_goal(&mut self, dt: f32, profile: &FlightProfile) {
        let response = if profile.use_avatar_modifiers {
            dt * BANKING_RESPONSE * (1.0 - (profile.weight - 1.0))
        } else {
            dt * BANKING_RESPONSE
        };
        self.rotation_speed += (self.rotation_goal - self.rotation_speed) * response;
    }
}

/// Orbits the play-space origin about the player by `degrees` around the
/// up axis and realigns the player to the rotated origin.
pub fn rotate_room(player: &mut dyn PlayerApi, degrees: f32) {
    let origin = player.tracking_pose(TrackingPoint::Origin);
    let pivot = player.position();
    let turn = Quat::from_rotation_y(degrees.to_radians());
    let position = rotate_about(origin.position, pivot, turn);
    let rotation = turn * origin.rotation;
    player.align_room_to(position, rotation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::light(1.0, 0.3)]
    #[case::heavy(1.5, 0.15)]
    fn speed_eases_toward_goal(#[case] weight: f32, #[case] fraction: f32) {
        let profile = FlightProfile {
            weight,
            ..FlightProfile::default()
        };
        let mut banking = BankingState {
            spinning: true,
            rotation_speed: 0.0,
            rotation_goal: 40.0,
        };
        banking.approach_goal(0.05, &profile);
        assert_relative_eq!(banking.rotation_speed, 40.0 * fraction, epsilon = 1e-4);
    }
}
