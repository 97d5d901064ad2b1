//! World gravity and locomotion speeds saved before flight alters them.
use log::warn;
use serde::Serialize;

use crate::player::{LocomotionSpeeds, PlayerApi};

/// The values restored when the player lands.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PhysicsSnapshot {
    /// Gravity multiplier outside flight.
    pub gravity: f32,
    /// Locomotion speeds outside flight.
    pub locomotion: LocomotionSpeeds,
}

impl Default for PhysicsSnapshot {
    fn default() -> Self {
        Self {
            gravity: 1.0,
            locomotion: LocomotionSpeeds::default(),
        }
    }
}

impl PhysicsSnapshot {
    /// Reads the player's current gravity and speeds.
    #[must_use]
    pub fn capture(player: &dyn PlayerApi) -> Self {
        Self {
            gravity: player.gravity_strength(),
            locomotion: player.locomotion(),
        }
    }

    /// Whether the live gravity differs from the saved value.
    #[must_use]
    pub fn gravity_diverged(&self, player: &dyn PlayerApi) -> bool {
        differs(player.gravity_strength(), self.gravity)
    }

    /// Whether any live locomotion speed differs from the saved value.
    #[must_use]
    pub fn locomotion_diverged(&self, player: &dyn PlayerApi) -> bool {
        let live = player.locomotion();
        differs(live.walk, self.locomotion.walk)
            || differs(live.run, self.locomotion.run)
            || differs(live.strafe, self.locomotion.strafe)
    }

    /// Logs a warning for each value the world changed behind our back.
    ///
    /// Returns `true` when anything diverged.
    pub fn warn_if_diverged(&self, player: &dyn PlayerApi) -> bool {
        let gravity = self.gravity_diverged(player);
        if gravity {
            warn!(
                "world gravity {} differs from saved gravity {}; call update_player_physics after changing it",
                player.gravity_strength(),
                self.gravity
            );
        }
        let locomotion = self.locomotion_diverged(player);
        if locomotion {
            warn!(
                "player movement {:?} differs from saved movement {:?}; call update_player_physics after changing it",
                player.locomotion(),
                self.locomotion
            );
        }
        gravity || locomotion
    }
}

fn differs(live: f32, saved: f32) -> bool {
    (live - saved).abs() > f32::EPSILON
}
