//! Command-line replay of a scripted flight for tuning profiles.
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use glam::{Quat, Vec3};
use log::{debug, info};
use serde::Serialize;

use avatar_flight::constants::TICK_DURATION;
use avatar_flight::gating::LogNotificationSink;
use avatar_flight::player::{Bone, Pose};
use avatar_flight::{
    init_logging, FlightController, FlightEvent, FlightMode, FlightPhase, FlightProfile,
    HostPlayer,
};

const WORLD_GRAVITY: f32 = 9.81;
const SHOULDER_HEIGHT: f32 = 1.4;
const HAND_REACH: f32 = 0.7;
const STROKE_TOP: f32 = 1.9;
const STROKE_STEP: f32 = 0.1;
const STROKE_FRAMES: u32 = 4;
const JUMP_SPEED: f32 = 4.0;

/// Scripted flight of a tracked avatar: a jump, a few wing strokes and a
/// glide down to the ground.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Flight profile as JSON; defaults are used when omitted
    #[arg(short, long)]
    profile: Option<PathBuf>,
    /// Wing strokes before gliding
    #[arg(long, default_value_t = 3)]
    flaps: u32,
    /// Longest time to glide after the last stroke, in seconds
    #[arg(long, default_value_t = 6.0)]
    glide_seconds: f32,
}

#[derive(Debug, Default, Serialize)]
struct FlightSummary {
    frames: u32,
    peak_height: f32,
    airborne_seconds: f32,
    final_phase: Option<FlightPhase>,
    events: Vec<FlightEvent>,
}

/// Avatar mirror with the state the script moves each frame.
struct ScriptedFlight {
    controller: FlightController,
    player: HostPlayer,
    hand_height: f32,
    summary: FlightSummary,
}

impl ScriptedFlight {
    fn new(profile: FlightProfile) -> Self {
        let controller = FlightController::new(profile, FlightMode::On, Box::new(LogNotificationSink));
        Self {
            controller,
            player: t_pose(),
            hand_height: SHOULDER_HEIGHT,
            summary: FlightSummary::default(),
        }
    }

    fn frame(&mut self) {
        let root = self.player.position;
        self.player.right_hand.position = root + Vec3::new(HAND_REACH, self.hand_height, 0.0);
        self.player.left_hand.position = root + Vec3::new(-HAND_REACH, self.hand_height, 0.0);

        let events = self.controller.update(TICK_DURATION, &mut self.player);
        self.summary.events.extend(events);
        self.integrate();

        self.summary.frames += 1;
        self.summary.peak_height = self.summary.peak_height.max(self.player.position.y);
        if !self.player.grounded {
            self.summary.airborne_seconds += TICK_DURATION;
        }
    }

    /// World physics the host would normally run.
    fn integrate(&mut self) {
        self.player.velocity.y -= WORLD_GRAVITY * self.player.gravity_strength * TICK_DURATION;
        self.player.translate(self.player.velocity * TICK_DURATION);
        if self.player.position.y <= 0.0 {
            self.player.translate(Vec3::new(0.0, -self.player.position.y, 0.0));
            self.player.velocity = Vec3::ZERO;
            self.player.grounded = true;
        }
    }

    fn stroke(&mut self) {
        self.hand_height = STROKE_TOP;
        self.frame();
        for _ in 0..STROKE_FRAMES {
            self.hand_height -= STROKE_STEP;
            self.frame();
        }
    }

    fn run(mut self, flaps: u32, glide_seconds: f32) -> FlightSummary {
        self.controller.start(&mut self.player);
        self.player.grounded = false;
        self.player.velocity = Vec3::new(0.0, JUMP_SPEED, 0.0);
        for stroke in 0..flaps {
            debug!("stroke {}", stroke + 1);
            self.stroke();
        }
        self.hand_height = SHOULDER_HEIGHT;
        let mut elapsed = 0.0;
        while elapsed < glide_seconds && !self.player.grounded {
            self.frame();
            elapsed += TICK_DURATION;
        }
        // One more frame lets the controller see the landing.
        self.frame();
        self.summary.final_phase = Some(self.controller.simulation().phase());
        self.summary
    }
}

/// A unit-armspan avatar standing in a T-pose.
fn t_pose() -> HostPlayer {
    let mut player = HostPlayer::default();
    for (bone, x) in [
        (Bone::RightUpperArm, 0.2),
        (Bone::RightLowerArm, 0.45),
        (Bone::RightHand, HAND_REACH),
        (Bone::LeftUpperArm, -0.2),
        (Bone::LeftLowerArm, -0.45),
        (Bone::LeftHand, -HAND_REACH),
    ] {
        player.bones.insert(bone, Vec3::new(x, SHOULDER_HEIGHT, 0.0));
    }
    player.head = Pose::new(Vec3::new(0.0, SHOULDER_HEIGHT + 0.3, 0.0), Quat::IDENTITY);
    player
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let profile = match &args.profile {
        Some(path) => FlightProfile::from_json_file(path)
            .with_context(|| format!("loading flight profile {}", path.display()))?,
        None => FlightProfile::default(),
    };

    let summary = ScriptedFlight::new(profile).run(args.flaps, args.glide_seconds);
    let report = serde_json::to_string_pretty(&summary).context("serialising flight summary")?;
    info!("flight summary\n{report}");
    Ok(())
}
