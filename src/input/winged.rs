//! Arm-tracking input for headset players.
use glam::{Quat, Vec3};

use super::{normalized_size, FlightInput, InputSignals};
use crate::anthropometry::BodyProportions;
use crate::constants::{BANKING_GAIN, HANDS_OUT_DIVISOR};
use crate::player::{Bone, PlayerApi, TrackingPoint};
use crate::profile::FlightProfile;
use crate::vector_math::{horizontal_distance, normalize_or_zero, slerp};

/// Hand offsets measured as `player position - hand position`, so a hand
/// moving down grows the offset's `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct HandOffsets {
    right: Vec3,
    left: Vec3,
}

/// Derives flight signals from tracked hands and arm bones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WingedInput {
    previous: Option<HandOffsets>,
}

impl FlightInput for WingedInput {
    fn sample(
        &mut self,
        player: &dyn PlayerApi,
        body: &BodyProportions,
        profile: &FlightProfile,
        dt: f32,
    ) -> InputSignals {
        let position = player.position();
        let right_pose = player.tracking_pose(TrackingPoint::RightHand);
        let left_pose = player.tracking_pose(TrackingPoint::LeftHand);
        let current = HandOffsets {
            right: position - right_pose.position,
            left: position - left_pose.position,
        };
        let previous = self.previous.replace(current).unwrap_or(current);

        let flap_displacement = (current.right - previous.right) + (current.left - previous.left);
        let size = normalized_size(body, profile);
        let down_thrust = if flap_displacement.y > 0.0 && size > 0.0 {
            flap_displacement.y * dt / size
        } else {
            0.0
        };

        let right_shoulder = player.bone_position(Bone::RightUpperArm);
        let left_shoulder = player.bone_position(Bone::LeftUpperArm);
        let right_hand = player.bone_position(Bone::RightHand);
        let left_hand = player.bone_position(Bone::LeftHand);

        let reach = body.armspan / HANDS_OUT_DIVISOR;
        let hands_out = horizontal_distance(right_shoulder, right_hand) > reach
            && horizontal_distance(left_shoulder, left_hand) > reach;
        let glide_pose = left_hand.distance(right_hand) > reach * 2.0 + body.shoulder_distance;
        let hands_raised =
            right_pose.position.y > right_shoulder.y && left_pose.position.y > left_shoulder.y;

        let wing_direction =
            wing_direction(right_pose.rotation, left_pose.rotation, profile.glide_angle_offset);
        let banking = if body.armspan > 0.0 {
            (current.right.y - current.left.y) * BANKING_GAIN / body.armspan
        } else {
            0.0
        };

        InputSignals {
            down_thrust,
            flap_displacement,
            hands_out,
            hands_raised,
            glide_pose,
            wing_direction,
            banking,
        }
    }

    fn reset(&mut self) {
        self.previous = None;
    }
}

/// Average forward of both hands, each pitched by the glide angle offset
/// in opposite directions.
fn wing_direction(right: Quat, left: Quat, angle_offset: f32) -> Vec3 {
    let pitch = angle_offset.to_radians();
    let right_forward = right * (Quat::from_rotation_x(pitch) * Vec3::Z);
    let left_forward = left * (Quat::from_rotation_x(-pitch) * Vec3::Z);
    normalize_or_zero(slerp(right_forward, left_forward, 0.5))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn wing_direction_averages_hands() {
        let right = Quat::from_rotation_y(0.4);
        let left = Quat::from_rotation_y(-0.4);
        let direction = wing_direction(right, left, 0.0);
        assert_relative_eq!(direction.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(direction.z, 1.0, epsilon = 1e-5);
    }

    #[rstest]
    fn opposing_offsets_cancel_when_hands_match() {
        let direction = wing_direction(Quat::IDENTITY, Quat::IDENTITY, 30.0);
        assert_relative_eq!(direction.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(direction.length(), 1.0, epsilon = 1e-5);
    }
}
