//! The per-player flight state machine.
//!
//! [`FlightSimulation`] runs one fixed tick at a time. Each tick samples the
//! input adapter, decides whether a flap starts, integrates flapping and
//! gliding, and stages a single velocity write for the player. Banking is
//! applied separately every visual frame through
//! [`FlightSimulation::frame_update`].
//!
//! Order matters within a tick: flapping is evaluated before flying and
//! flying before gliding, because later steps read state written by
//! earlier ones.

pub mod banking;
pub mod debug;
pub mod events;
pub mod flap;
pub mod glide;
pub mod physics_snapshot;
pub mod state;

pub use debug::{DebugSink, DebugSnapshot, LogDebugSink};
pub use events::{EventInbox, FlightEvent, TickOutcome};
pub use physics_snapshot::PhysicsSnapshot;
pub use state::{BankingState, FlightPhase, SimulationState};

use glam::{Quat, Vec3};
use log::{debug, info};

use crate::anthropometry::BodyProportions;
use crate::constants::{
    AVATAR_SWAP_COOLDOWN_TICKS, DEBUG_INTERVAL_TICKS, FLAP_START_THRESHOLD, GLIDE_DELAY_DECAY,
    GLIDE_DELAY_START, GLIDE_DELAY_VERTICAL_SPEED, IMMOBILISED_SPEED, MAX_BANKING_ANGLE,
};
use crate::input::{FlightInput, InputAdapter, InputContext, InputSignals};
use crate::player::{LocomotionSpeeds, PlayerApi};
use crate::profile::FlightProfile;
use crate::proxy::{is_main_menu_open, is_player_in_station};
use crate::tuning::DerivedConstants;
use crate::vector_math::normalize_or_zero;

/// Flight simulation for the local player.
///
/// The simulation starts disabled. [`FlightSimulation::enable`] resets it
/// and saves the world physics; [`FlightSimulation::disable`] lands the
/// player if needed so saved physics are always restored.
#[derive(Debug, Clone)]
pub struct FlightSimulation {
    profile: FlightProfile,
    input: InputAdapter,
    state: SimulationState,
    snapshot: PhysicsSnapshot,
    events: EventInbox,
    last_signals: InputSignals,
    ticks_since_debug: u32,
    enabled: bool,
}

impl FlightSimulation {
    /// Creates a disabled simulation. Out-of-domain profile values are
    /// clamped.
    #[must_use]
    pub fn new(profile: FlightProfile, input: InputAdapter) -> Self {
        Self {
            profile: profile.sanitised(),
            input,
            state: SimulationState::default(),
            snapshot: PhysicsSnapshot::default(),
            events: EventInbox::default(),
            last_signals: InputSignals::default(),
            ticks_since_debug: 0,
            enabled: false,
        }
    }

    /// Creates a disabled simulation with the adapter for `context`.
    #[must_use]
    pub fn for_context(profile: FlightProfile, context: InputContext) -> Self {
        Self::new(profile, InputAdapter::for_context(context))
    }

    /// The active profile.
    #[must_use]
    pub const fn profile(&self) -> &FlightProfile {
        &self.profile
    }

    /// Replaces the profile. Out-of-domain values are clamped.
    pub fn set_profile(&mut self, profile: &FlightProfile) {
        self.profile = profile.sanitised();
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }

    /// Coarse flight phase.
    #[must_use]
    pub const fn phase(&self) -> FlightPhase {
        self.state.phase()
    }

    /// Physics values restored on landing.
    #[must_use]
    pub const fn physics_snapshot(&self) -> PhysicsSnapshot {
        self.snapshot
    }

    /// Signals sampled on the most recent tick.
    #[must_use]
    pub const fn last_signals(&self) -> InputSignals {
        self.last_signals
    }

    /// Whether ticks currently run.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Input context of the current adapter.
    #[must_use]
    pub const fn input_context(&self) -> InputContext {
        self.input.context()
    }

    /// Swaps the input adapter, forgetting its history.
    pub fn set_input(&mut self, input: InputAdapter) {
        self.input = input;
        self.input.reset();
    }

    /// Constants for the current profile and avatar.
    #[must_use]
    pub fn derived_constants(&self) -> DerivedConstants {
        DerivedConstants::compute(&self.profile, &self.state.proportions)
    }

    /// Removes and returns pending flight events.
    pub fn drain_events(&mut self) -> Vec<FlightEvent> {
        self.events.drain().collect()
    }

    /// Resets the state and starts ticking.
    ///
    /// Unless dynamic physics is on, the player's gravity and speeds are
    /// saved here and restored on every landing. Body proportions are
    /// measured on the first tick.
    pub fn enable(&mut self, player: &dyn PlayerApi) {
        self.state = SimulationState::default();
        self.input.reset();
        self.ticks_since_debug = 0;
        if !self.profile.dynamic_player_physics {
            self.snapshot = PhysicsSnapshot::capture(player);
            debug!("player physics saved: {:?}", self.snapshot);
        }
        self.enabled = true;
        info!("flight enabled");
    }

    /// Stops ticking, landing first when flying.
    pub fn disable(&mut self, player: &mut dyn PlayerApi) {
        if self.state.flying {
            self.land(player);
        }
        self.enabled = false;
        info!("flight disabled");
    }

    /// Pulls the current world gravity and speeds into the saved snapshot.
    ///
    /// Does nothing with dynamic physics, which reads them at take-off.
    pub fn update_player_physics(&mut self, player: &dyn PlayerApi) {
        if self.profile.dynamic_player_physics {
            info!("dynamic player physics enabled; snapshot refreshes at take-off");
            return;
        }
        self.snapshot = PhysicsSnapshot::capture(player);
        info!("player physics updated: {:?}", self.snapshot);
    }

    /// Handles a change of avatar.
    ///
    /// Velocity writes pause for [`AVATAR_SWAP_COOLDOWN_TICKS`] ticks, then
    /// the body proportions are measured again.
    pub fn on_avatar_changed(&mut self) {
        self.state.cannot_fly_ticks = AVATAR_SWAP_COOLDOWN_TICKS;
        self.state.write_velocity = false;
        self.state.pending_recompute = true;
        debug!("avatar changed; velocity writes paused");
    }

    /// Starts flight. Does nothing when already flying.
    ///
    /// Returns `true` when the player took off.
    pub fn take_off(&mut self, player: &mut dyn PlayerApi) -> bool {
        if self.state.flying {
            return false;
        }
        self.set_flying(true);
        if self.profile.dynamic_player_physics {
            self.snapshot.gravity = player.gravity_strength();
        } else {
            self.snapshot.warn_if_diverged(player);
        }
        player.set_gravity_strength(self.derived_constants().flight_gravity);
        if !self.profile.allow_locomotion {
            if self.profile.dynamic_player_physics {
                self.snapshot.locomotion = player.locomotion();
            }
            player.set_locomotion(LocomotionSpeeds::uniform(IMMOBILISED_SPEED));
        }
        info!("took off");
        true
    }

    /// Ends flight and restores the saved physics. Does nothing when not
    /// flying.
    ///
    /// Returns `true` when the player landed.
    pub fn land(&mut self, player: &mut dyn PlayerApi) -> bool {
        if !self.state.flying {
            return false;
        }
        self.set_flying(false);
        self.set_flapping(false);
        self.set_gliding(false);
        self.state.banking.stop();
        player.set_gravity_strength(self.snapshot.gravity);
        if !self.profile.allow_locomotion {
            player.set_locomotion(self.snapshot.locomotion);
        }
        if !self.profile.dynamic_player_physics {
            self.snapshot.warn_if_diverged(player);
        }
        info!("landed");
        true
    }

    /// Runs one fixed tick of length `dt`.
    ///
    /// `flight_allowed` gates starting a flap or a fall-to-glide take-off.
    pub fn tick(
        &mut self,
        dt: f32,
        player: &mut dyn PlayerApi,
        flight_allowed: bool,
    ) -> TickOutcome {
        if !self.enabled {
            return TickOutcome {
                events: self.drain_events(),
                debug: None,
            };
        }
        if !self.state.initialised {
            self.state.initialised = true;
            self.measure_body(player);
        }
        self.state.write_velocity = false;

        let signals = self
            .input
            .sample(player, &self.state.proportions, &self.profile, dt);
        self.last_signals = signals;
        let grounded = player.is_grounded();

        if !grounded && player.velocity().y < 0.0 {
            self.state.falling_ticks = self.state.falling_ticks.saturating_add(1);
        } else {
            self.state.falling_ticks = 0;
        }
        self.state.flap_cooldown = (self.state.flap_cooldown - dt).max(0.0);

        if !self.state.flapping && self.flap_starts(&signals, grounded, player, flight_allowed) {
            self.set_flapping(true);
            self.take_off(player);
        }
        if self.state.flapping {
            self.flap_tick(&signals, grounded, player);
        }
        if self.fall_to_glide_ready(&signals, flight_allowed) {
            self.take_off(player);
        }
        if self.state.flying {
            self.fly_tick(dt, &signals, grounded, player);
        }

        if self.state.cannot_fly_ticks > 0 {
            self.state.write_velocity = false;
            self.state.cannot_fly_ticks -= 1;
            if self.state.cannot_fly_ticks == 0 && self.state.pending_recompute {
                self.measure_body(player);
            }
        }
        if self.state.write_velocity {
            player.set_velocity(self.state.final_velocity);
        }

        TickOutcome {
            events: self.drain_events(),
            debug: self.debug_snapshot(grounded, player),
        }
    }

    /// Applies banking rotation for one visual frame of length `frame_dt`.
    pub fn frame_update(&mut self, frame_dt: f32, player: &mut dyn PlayerApi) {
        if !self.enabled || !self.state.banking.spinning {
            return;
        }
        self.state.banking.approach_goal(frame_dt, &self.profile);
        banking::rotate_room(player, self.state.banking.rotation_speed * frame_dt);
    }

    fn measure_body(&mut self, player: &dyn PlayerApi) {
        self.state.proportions = BodyProportions::measure(player);
        self.state.pending_recompute = false;
        info!(
            "armspan {} shoulder distance {}",
            self.state.proportions.armspan, self.state.proportions.shoulder_distance
        );
    }

    fn flap_starts(
        &self,
        signals: &InputSignals,
        grounded: bool,
        player: &dyn PlayerApi,
        flight_allowed: bool,
    ) -> bool {
        let posture = (self.state.flying || signals.hands_out) && signals.hands_raised;
        let airborne_ok = !grounded || !self.profile.require_jump;
        flight_allowed
            && posture
            && airborne_ok
            && signals.down_thrust > FLAP_START_THRESHOLD
            && self.state.flap_cooldown <= 0.0
            && !is_main_menu_open(player)
            && !is_player_in_station(player)
    }

    fn flap_tick(&mut self, signals: &InputSignals, grounded: bool, player: &dyn PlayerApi) {
        if signals.down_thrust > 0.0 {
            self.state.final_velocity = flap::stroke_velocity(
                player.velocity(),
                signals.flap_displacement,
                grounded,
                self.derived_constants().flap_strength,
                self.profile.horizontal_strength_mod,
            );
            self.state.write_velocity = true;
        } else {
            // A seated player could otherwise bank velocity by flapping.
            if grounded {
                self.state.final_velocity = Vec3::ZERO;
                self.state.write_velocity = true;
            }
            self.set_flapping(false);
            self.state.flap_cooldown = self.profile.flap_delay;
        }
    }

    fn fall_to_glide_ready(&self, signals: &InputSignals, flight_allowed: bool) -> bool {
        self.profile.fall_to_glide
            && flight_allowed
            && self.profile.can_glide
            && self.state.falling_ticks >= self.profile.fall_to_glide_activation_delay
            && signals.hands_out
            && signals.glide_pose
    }

    fn fly_tick(
        &mut self,
        dt: f32,
        signals: &InputSignals,
        grounded: bool,
        player: &mut dyn PlayerApi,
    ) {
        if is_main_menu_open(player) || (!self.state.flapping && grounded) {
            self.land(player);
            return;
        }

        let flight_gravity = self.derived_constants().flight_gravity;
        let gravity_off = (player.gravity_strength() - flight_gravity).abs() > f32::EPSILON;
        if gravity_off && player.velocity().y < 0.0 {
            player.set_gravity_strength(flight_gravity);
        }

        let glide_pose = !self.state.flapping
            && (self.state.gliding || signals.hands_out)
            && signals.glide_pose
            && self.profile.can_glide;
        if glide_pose {
            self.glide_tick(dt, signals, player);
        } else {
            self.set_gliding(false);
            self.state.banking.rotation_goal = 0.0;
            self.state.glide_delay = 0.0;
        }
    }

    fn glide_tick(&mut self, dt: f32, signals: &InputSignals, player: &dyn PlayerApi) {
        let player_velocity = player.velocity();
        if player_velocity.y > GLIDE_DELAY_VERTICAL_SPEED && !self.state.gliding {
            self.state.glide_delay = GLIDE_DELAY_START;
        }
        self.set_gliding(true);

        let staged = if self.state.write_velocity {
            self.state.final_velocity
        } else {
            player_velocity
        };
        let wing = if self.state.glide_delay <= 1.0 {
            signals.wing_direction
        } else {
            self.state.glide_delay -= GLIDE_DELAY_DECAY * dt;
            normalize_or_zero(staged)
        };
        let velocity = glide::unlock_vertical(staged, wing);

        let steering = signals
            .banking
            .clamp(-MAX_BANKING_ANGLE, MAX_BANKING_ANGLE);
        let steered_wing = if self.profile.banking_turns {
            self.state.banking.spinning = true;
            self.state.banking.rotation_goal = steering;
            wing
        } else {
            Quat::from_rotation_y(steering.to_radians()) * wing
        };
        self.state.wing_direction = steered_wing;

        let target = glide::target_velocity(velocity, steered_wing);
        if self.state.glide_delay > 0.0 {
            self.state.glide_delay -= GLIDE_DELAY_DECAY * dt;
        }
        let control = glide::glide_control(&self.profile) * (1.0 - self.state.glide_delay);
        self.state.final_velocity =
            glide::blend_toward(velocity, target, dt * control, self.profile.air_friction);
        self.state.write_velocity = true;
    }

    fn debug_snapshot(&mut self, grounded: bool, player: &dyn PlayerApi) -> Option<DebugSnapshot> {
        self.ticks_since_debug += 1;
        if self.ticks_since_debug < DEBUG_INTERVAL_TICKS {
            return None;
        }
        self.ticks_since_debug = 0;
        Some(DebugSnapshot {
            flying: self.state.flying,
            flapping: self.state.flapping,
            gliding: self.state.gliding,
            hands_out: self.last_signals.hands_out,
            down_thrust: self.last_signals.down_thrust,
            cannot_fly: self.state.cannot_fly_ticks > 0,
            glide_delay: self.state.glide_delay,
            grounded,
            vertical_speed: player.velocity().y,
        })
    }

    fn set_flying(&mut self, flying: bool) {
        if self.state.flying != flying {
            self.state.flying = flying;
            self.events.push(FlightEvent::FlyingChanged(flying));
        }
    }

    fn set_flapping(&mut self, flapping: bool) {
        if self.state.flapping != flapping {
            self.state.flapping = flapping;
            self.events.push(FlightEvent::FlappingChanged(flapping));
        }
    }

    fn set_gliding(&mut self, gliding: bool) {
        if self.state.gliding != gliding {
            self.state.gliding = gliding;
            self.events.push(FlightEvent::GlidingChanged(gliding));
        }
    }
}
