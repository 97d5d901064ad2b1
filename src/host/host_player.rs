//! Plain-data mirror of the local player.
//!
//! Hosts copy tracking data, grounding and overlap results into a
//! [`HostPlayer`] before each frame and read the velocity, gravity and
//! room alignment back afterwards.
use glam::{Quat, Vec3};
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::constants::STATION_LAYER_MASK;
use crate::player::{
    Bone, FlightButton, LocomotionSpeeds, OverlapSummary, PlayerApi, Pose, TrackingPoint,
};

/// Player state owned by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostPlayer {
    /// Avatar root.
    pub position: Vec3,
    /// Current velocity.
    pub velocity: Vec3,
    /// Whether the player stands on ground.
    pub grounded: bool,
    /// Gravity multiplier.
    pub gravity_strength: f32,
    /// Locomotion speeds.
    pub locomotion: LocomotionSpeeds,
    /// Skeleton joints; missing joints read as the origin.
    pub bones: HashMap<Bone, Vec3>,
    /// Head or camera.
    pub head: Pose,
    /// Right controller.
    pub right_hand: Pose,
    /// Left controller.
    pub left_hand: Pose,
    /// Play-space origin.
    pub origin: Pose,
    /// Overlap results keyed by layer mask. Masks without an entry report
    /// nothing.
    pub overlaps: HashMap<u32, OverlapSummary>,
    /// Whether a headset is worn.
    pub in_vr: bool,
    /// Desktop buttons currently held.
    pub held: HashSet<FlightButton>,
    /// Number of velocity writes since the host last cleared it.
    pub velocity_writes: usize,
}

impl Default for HostPlayer {
    /// A grounded headset player standing at the origin.
    ///
    /// The player's own collider is reported on the station layer, which
    /// is what a player who is not seated sees.
    fn default() -> Self {
        let own_collider = OverlapSummary {
            count: 1,
            any_unresolved: false,
        };
        Self {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            grounded: true,
            gravity_strength: 1.0,
            locomotion: LocomotionSpeeds::default(),
            bones: HashMap::new(),
            head: Pose::default(),
            right_hand: Pose::default(),
            left_hand: Pose::default(),
            origin: Pose::default(),
            overlaps: HashMap::from([(STATION_LAYER_MASK, own_collider)]),
            in_vr: true,
            held: HashSet::new(),
            velocity_writes: 0,
        }
    }
}

impl HostPlayer {
    /// Moves every tracked point by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
        for pose in [
            &mut self.head,
            &mut self.right_hand,
            &mut self.left_hand,
            &mut self.origin,
        ] {
            pose.position += delta;
        }
        for joint in self.bones.values_mut() {
            *joint += delta;
        }
    }

    /// Replaces the overlap result reported for `layer_mask`.
    pub fn set_overlap(&mut self, layer_mask: u32, summary: OverlapSummary) {
        self.overlaps.insert(layer_mask, summary);
    }

    /// Marks `button` as held or released.
    pub fn set_button(&mut self, button: FlightButton, held: bool) {
        if held {
            self.held.insert(button);
        } else {
            self.held.remove(&button);
        }
    }
}

impl PlayerApi for HostPlayer {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
        self.velocity_writes += 1;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn gravity_strength(&self) -> f32 {
        self.gravity_strength
    }

    fn set_gravity_strength(&mut self, strength: f32) {
        self.gravity_strength = strength;
    }

    fn locomotion(&self) -> LocomotionSpeeds {
        self.locomotion
    }

    fn set_locomotion(&mut self, speeds: LocomotionSpeeds) {
        self.locomotion = speeds;
    }

    fn bone_position(&self, bone: Bone) -> Vec3 {
        self.bones.get(&bone).copied().unwrap_or(Vec3::ZERO)
    }

    fn tracking_pose(&self, point: TrackingPoint) -> Pose {
        match point {
            TrackingPoint::Head => self.head,
            TrackingPoint::RightHand => self.right_hand,
            TrackingPoint::LeftHand => self.left_hand,
            TrackingPoint::Origin => self.origin,
        }
    }

    fn align_room_to(&mut self, position: Vec3, rotation: Quat) {
        let previous = self.origin;
        let turn = rotation * previous.rotation.inverse();
        let carry = |point: Vec3| position + turn * (point - previous.position);
        self.position = carry(self.position);
        for pose in [&mut self.head, &mut self.right_hand, &mut self.left_hand] {
            pose.position = carry(pose.position);
            pose.rotation = turn * pose.rotation;
        }
        for joint in self.bones.values_mut() {
            *joint = carry(*joint);
        }
        self.origin = Pose::new(position, rotation);
    }

    fn overlap_sphere(&self, _center: Vec3, _radius: f32, layer_mask: u32) -> OverlapSummary {
        self.overlaps.get(&layer_mask).copied().unwrap_or_default()
    }

    fn is_user_in_vr(&self) -> bool {
        self.in_vr
    }

    fn is_button_held(&self, button: FlightButton) -> bool {
        self.held.contains(&button)
    }
}
