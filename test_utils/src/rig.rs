//! A tracked avatar and a driver that moves its arms.
use avatar_flight::constants::TICK_DURATION;
use avatar_flight::controller::FlightController;
use avatar_flight::flight::FlightEvent;
use avatar_flight::gating::FlightMode;
use avatar_flight::host::HostPlayer;
use avatar_flight::player::{Bone, PlayerApi, Pose};
use avatar_flight::profile::FlightProfile;
use glam::{Quat, Vec3};

/// Height of the shoulder joints above the avatar root.
pub const SHOULDER_HEIGHT: f32 = 1.4;
/// Half the distance between the shoulders for a unit armspan.
pub const SHOULDER_HALF_WIDTH: f32 = 0.2;
/// Length of one arm segment for a unit armspan.
pub const SEGMENT: f32 = 0.25;

/// A grounded avatar at the origin standing in a T-pose.
///
/// Both arms run along the x axis, so the armspan is `scale` and the
/// shoulder distance is `0.4 * scale`. The controllers rest at the
/// wrists.
pub fn t_pose_player(scale: f32) -> HostPlayer {
    let mut player = HostPlayer::default();
    let shoulder = SHOULDER_HALF_WIDTH * scale;
    let segment = SEGMENT * scale;
    let height = SHOULDER_HEIGHT * scale;
    let joints = [
        (Bone::RightUpperArm, shoulder),
        (Bone::RightLowerArm, shoulder + segment),
        (Bone::RightHand, shoulder + 2.0 * segment),
        (Bone::LeftUpperArm, -shoulder),
        (Bone::LeftLowerArm, -shoulder - segment),
        (Bone::LeftHand, -shoulder - 2.0 * segment),
    ];
    for (bone, x) in joints {
        player.bones.insert(bone, Vec3::new(x, height, 0.0));
    }
    player.head = Pose::new(Vec3::new(0.0, height + 0.3 * scale, 0.0), Quat::IDENTITY);
    player.right_hand = Pose::new(player.bone_position(Bone::RightHand), Quat::IDENTITY);
    player.left_hand = Pose::new(player.bone_position(Bone::LeftHand), Quat::IDENTITY);
    player
}

/// Drives a [`FlightController`] one fixed tick per frame.
#[derive(Debug)]
pub struct Flyer {
    /// Controller under test.
    pub controller: FlightController,
    /// Player the controller moves.
    pub player: HostPlayer,
    /// Every event reported so far.
    pub events: Vec<FlightEvent>,
}

impl Flyer {
    /// A unit-armspan avatar with flight forced on.
    pub fn flying_allowed(profile: FlightProfile) -> Self {
        Self::new(profile, FlightMode::On)
    }

    /// A unit-armspan avatar in `mode` with quiet notifications.
    pub fn new(profile: FlightProfile, mode: FlightMode) -> Self {
        let sink = crate::sinks::RecordingNotifications::default();
        Self::with_controller(FlightController::new(profile, mode, sink.boxed()), t_pose_player(1.0))
    }

    /// Wraps an existing controller and player, applying the mode.
    pub fn with_controller(mut controller: FlightController, mut player: HostPlayer) -> Self {
        controller.start(&mut player);
        let events = controller.drain_events();
        Self {
            controller,
            player,
            events,
        }
    }

    /// Runs one frame of exactly one tick.
    pub fn step(&mut self) {
        let events = self.controller.update(TICK_DURATION, &mut self.player);
        self.events.extend(events);
    }

    /// Runs `frames` frames without moving.
    pub fn hold(&mut self, frames: usize) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Leaves the ground moving upward at `speed`.
    pub fn jump(&mut self, speed: f32) {
        self.player.grounded = false;
        self.player.velocity = Vec3::new(0.0, speed, 0.0);
    }

    /// Places both controllers `height` above the root, beside the
    /// shoulders, and lets one frame pass.
    pub fn raise_hands(&mut self, height: f32) {
        let root = self.player.position;
        self.player.right_hand.position = root + Vec3::new(0.7, height, 0.0);
        self.player.left_hand.position = root + Vec3::new(-0.7, height, 0.0);
        self.step();
    }

    /// Moves both controllers down by `drop` each frame for `frames`
    /// frames.
    pub fn sweep_down(&mut self, drop: f32, frames: usize) {
        for _ in 0..frames {
            self.player.right_hand.position.y -= drop;
            self.player.left_hand.position.y -= drop;
            self.step();
        }
    }

    /// One full wing stroke: hands up high, then four fast sweeps down.
    pub fn flap(&mut self) {
        self.raise_hands(1.9);
        self.sweep_down(0.1, 4);
    }

    /// Turns both controllers to face `rotation`.
    pub fn point_hands(&mut self, rotation: Quat) {
        self.player.right_hand.rotation = rotation;
        self.player.left_hand.rotation = rotation;
    }

    /// Pulls both arms in against the body.
    pub fn fold_arms(&mut self) {
        for (bone, x) in [
            (Bone::RightLowerArm, 0.2),
            (Bone::RightHand, 0.2),
            (Bone::LeftLowerArm, -0.2),
            (Bone::LeftHand, -0.2),
        ] {
            self.player.bones.insert(bone, Vec3::new(x, 1.0, 0.0));
        }
    }

    /// Number of times `event` was reported.
    pub fn count(&self, event: FlightEvent) -> usize {
        self.events.iter().filter(|seen| **seen == event).count()
    }
}
