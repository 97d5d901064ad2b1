//! Accessor surface for the local player avatar.
//!
//! The flight core never reaches for a global player handle. Every
//! operation that reads tracking data or writes motion takes a
//! `&mut dyn PlayerApi` so hosts and tests can supply their own.
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Skeleton joints the flight code reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bone {
    /// Root of the right arm at the shoulder.
    RightUpperArm,
    /// Right elbow.
    RightLowerArm,
    /// Right wrist.
    RightHand,
    /// Root of the left arm at the shoulder.
    LeftUpperArm,
    /// Left elbow.
    LeftLowerArm,
    /// Left wrist.
    LeftHand,
}

impl Bone {
    /// Every bone sampled for body proportions.
    pub const ALL: [Self; 6] = [
        Self::RightUpperArm,
        Self::RightLowerArm,
        Self::RightHand,
        Self::LeftUpperArm,
        Self::LeftLowerArm,
        Self::LeftHand,
    ];
}

/// Tracked points reported by the headset or desktop rig.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrackingPoint {
    /// The head or camera.
    Head,
    /// Right controller.
    RightHand,
    /// Left controller.
    LeftHand,
    /// Play-space origin the player moves relative to.
    Origin,
}

/// Position and orientation of a tracked point in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quat,
}

impl Pose {
    /// Creates a pose from its parts.
    #[must_use]
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Unit vector the pose faces along.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY)
    }
}

/// Walk, run and strafe speeds of the locomotion system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocomotionSpeeds {
    /// Walking speed.
    pub walk: f32,
    /// Running speed.
    pub run: f32,
    /// Sideways speed.
    pub strafe: f32,
}

impl LocomotionSpeeds {
    /// The same speed on every axis of movement.
    #[must_use]
    pub const fn uniform(speed: f32) -> Self {
        Self {
            walk: speed,
            run: speed,
            strafe: speed,
        }
    }
}

impl Default for LocomotionSpeeds {
    fn default() -> Self {
        Self {
            walk: 2.0,
            run: 4.0,
            strafe: 2.0,
        }
    }
}

/// Result of a sphere overlap query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlapSummary {
    /// Number of colliders found.
    pub count: usize,
    /// Whether any reported collider could not be resolved to an object.
    pub any_unresolved: bool,
}

/// Buttons a desktop player uses in place of arm motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlightButton {
    /// Flap once per press.
    Flap,
    /// Hold to glide.
    Glide,
}

/// Everything the flight core needs from the local player.
pub trait PlayerApi {
    /// Avatar root position.
    fn position(&self) -> Vec3;
    /// Current velocity.
    fn velocity(&self) -> Vec3;
    /// Replaces the velocity.
    fn set_velocity(&mut self, velocity: Vec3);
    /// Whether the player stands on ground.
    fn is_grounded(&self) -> bool;
    /// Gravity multiplier applied to the player.
    fn gravity_strength(&self) -> f32;
    /// Replaces the gravity multiplier.
    fn set_gravity_strength(&mut self, strength: f32);
    /// Current locomotion speeds.
    fn locomotion(&self) -> LocomotionSpeeds;
    /// Replaces the locomotion speeds.
    fn set_locomotion(&mut self, speeds: LocomotionSpeeds);
    /// World-space position of a skeleton joint. Missing joints report zero.
    fn bone_position(&self, bone: Bone) -> Vec3;
    /// Pose of a tracked point.
    fn tracking_pose(&self, point: TrackingPoint) -> Pose;
    /// Moves the play space so its origin sits at `position` facing
    /// `rotation`, carrying the player with it.
    fn align_room_to(&mut self, position: Vec3, rotation: Quat);
    /// Counts colliders on `layer_mask` within `radius` of `center`.
    fn overlap_sphere(&self, center: Vec3, radius: f32, layer_mask: u32) -> OverlapSummary;
    /// Whether the player wears a headset.
    fn is_user_in_vr(&self) -> bool;
    /// Whether a desktop flight button is held.
    fn is_button_held(&self, button: FlightButton) -> bool;
}
