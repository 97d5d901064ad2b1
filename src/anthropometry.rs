//! Body proportions estimated from the avatar skeleton.
//!
//! Flap strength and gravity scale with the avatar's armspan, measured as
//! the sum of the upper and lower arm segments on both sides. The distance
//! between the shoulders is kept separately because the glide pose check
//! needs it on its own.
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::player::{Bone, PlayerApi};

/// Positions of the six arm joints at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SkeletonSample {
    /// Right shoulder joint.
    pub right_upper_arm: Vec3,
    /// Right elbow.
    pub right_lower_arm: Vec3,
    /// Right wrist.
    pub right_hand: Vec3,
    /// Left shoulder joint.
    pub left_upper_arm: Vec3,
    /// Left elbow.
    pub left_lower_arm: Vec3,
    /// Left wrist.
    pub left_hand: Vec3,
}

impl SkeletonSample {
    /// Reads the arm joints from the player.
    #[must_use]
    pub fn capture(player: &dyn PlayerApi) -> Self {
        Self {
            right_upper_arm: player.bone_position(Bone::RightUpperArm),
            right_lower_arm: player.bone_position(Bone::RightLowerArm),
            right_hand: player.bone_position(Bone::RightHand),
            left_upper_arm: player.bone_position(Bone::LeftUpperArm),
            left_lower_arm: player.bone_position(Bone::LeftLowerArm),
            left_hand: player.bone_position(Bone::LeftHand),
        }
    }
}

/// Armspan and shoulder width of the current avatar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyProportions {
    /// Combined arm length of both arms, excluding the shoulders.
    pub armspan: f32,
    /// Distance between the two shoulder joints.
    pub shoulder_distance: f32,
}

impl Default for BodyProportions {
    /// A unit armspan, used before the first skeleton sample.
    fn default() -> Self {
        Self {
            armspan: 1.0,
            shoulder_distance: 0.0,
        }
    }
}

impl BodyProportions {
    /// Measures the skeleton.
    ///
    /// A collapsed skeleton with every joint at the same point yields an
    /// armspan of zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::Vec3;
    /// use avatar_flight::anthropometry::{BodyProportions, SkeletonSample};
    /// let sample = SkeletonSample {
    ///     right_upper_arm: Vec3::new(0.2, 1.4, 0.0),
    ///     right_lower_arm: Vec3::new(0.5, 1.4, 0.0),
    ///     right_hand: Vec3::new(0.75, 1.4, 0.0),
    ///     left_upper_arm: Vec3::new(-0.2, 1.4, 0.0),
    ///     left_lower_arm: Vec3::new(-0.5, 1.4, 0.0),
    ///     left_hand: Vec3::new(-0.75, 1.4, 0.0),
    /// };
    /// let body = BodyProportions::from_skeleton(&sample);
    /// assert!((body.armspan - 1.1).abs() < 1e-5);
    /// assert!((body.shoulder_distance - 0.4).abs() < 1e-5);
    /// ```
    #[must_use]
    pub fn from_skeleton(sample: &SkeletonSample) -> Self {
        let armspan = sample.left_upper_arm.distance(sample.left_lower_arm)
            + sample.left_lower_arm.distance(sample.left_hand)
            + sample.right_upper_arm.distance(sample.right_lower_arm)
            + sample.right_lower_arm.distance(sample.right_hand);
        let shoulder_distance = sample.left_upper_arm.distance(sample.right_upper_arm);
        Self {
            armspan: finite_or_zero(armspan),
            shoulder_distance: finite_or_zero(shoulder_distance),
        }
    }

    /// Samples and measures the player's skeleton in one step.
    #[must_use]
    pub fn measure(player: &dyn PlayerApi) -> Self {
        Self::from_skeleton(&SkeletonSample::capture(player))
    }
}

const fn finite_or_zero(value: f32) -> f32 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
