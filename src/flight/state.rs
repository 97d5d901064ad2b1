//! Transient per-player flight state.
use glam::Vec3;
use serde::Serialize;

use crate::anthropometry::BodyProportions;

/// Coarse summary of the flight flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlightPhase {
    /// Not flying.
    Grounded,
    /// Flying with a wing stroke in progress.
    Flapping,
    /// Flying on momentum.
    Flying,
    /// Flying with the glide pose held.
    Gliding,
}

/// Rotation applied to the play space while banking through a glide.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BankingState {
    /// Whether the room is being rotated each frame.
    pub spinning: bool,
    /// Current rotation speed in degrees per second.
    pub rotation_speed: f32,
    /// Rotation speed the banking eases toward.
    pub rotation_goal: f32,
}

impl BankingState {
    /// Stops rotating and forgets any speed.
    pub const fn stop(&mut self) {
        self.spinning = false;
        self.rotation_speed = 0.0;
        self.rotation_goal = 0.0;
    }
}

/// Everything the simulation remembers between ticks.
///
/// `gliding` implies `flying`. `flapping` may hold with or without
/// `flying` for the single tick in which a flap starts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationState {
    pub(crate) flying: bool,
    pub(crate) flapping: bool,
    pub(crate) gliding: bool,
    pub(crate) proportions: BodyProportions,
    pub(crate) cannot_fly_ticks: u32,
    pub(crate) falling_ticks: u32,
    pub(crate) glide_delay: f32,
    pub(crate) flap_cooldown: f32,
    pub(crate) final_velocity: Vec3,
    pub(crate) write_velocity: bool,
    pub(crate) banking: BankingState,
    pub(crate) wing_direction: Vec3,
    pub(crate) initialised: bool,
    pub(crate) pending_recompute: bool,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            flying: false,
            flapping: false,
            gliding: false,
            proportions: BodyProportions::default(),
            cannot_fly_ticks: 0,
            falling_ticks: 0,
            glide_delay: 0.0,
            flap_cooldown: 0.0,
            final_velocity: Vec3::ZERO,
            write_velocity: false,
            banking: BankingState::default(),
            wing_direction: Vec3::Z,
            initialised: false,
            pending_recompute: false,
        }
    }
}

impl SimulationState {
    /// Whether the player is in flight.
    #[must_use]
    pub const fn is_flying(&self) -> bool {
        self.flying
    }

    /// Whether a wing stroke is in progress.
    #[must_use]
    pub const fn is_flapping(&self) -> bool {
        self.flapping
    }

    /// Whether the glide pose is steering the player.
    #[must_use]
    pub const fn is_gliding(&self) -> bool {
        self.gliding
    }

    /// Proportions of the current avatar.
    #[must_use]
    pub const fn proportions(&self) -> BodyProportions {
        self.proportions
    }

    /// Ticks left before velocity writes resume after an avatar swap.
    #[must_use]
    pub const fn cannot_fly_ticks(&self) -> u32 {
        self.cannot_fly_ticks
    }

    /// Consecutive airborne ticks spent falling.
    #[must_use]
    pub const fn falling_ticks(&self) -> u32 {
        self.falling_ticks
    }

    /// Remaining glide blend-in delay.
    #[must_use]
    pub const fn glide_delay(&self) -> f32 {
        self.glide_delay
    }

    /// Banking rotation state.
    #[must_use]
    pub const fn banking(&self) -> BankingState {
        self.banking
    }

    /// Direction the wings pointed during the last glide tick.
    #[must_use]
    pub const fn wing_direction(&self) -> Vec3 {
        self.wing_direction
    }

    /// Summarises the flags.
    #[must_use]
    pub const fn phase(&self) -> FlightPhase {
        if !self.flying {
            FlightPhase::Grounded
        } else if self.flapping {
            FlightPhase::Flapping
        } else if self.gliding {
            FlightPhase::Gliding
        } else {
            FlightPhase::Flying
        }
    }
}
