//! Periodic status dumps for on-screen debugging.
use std::fmt;

use serde::Serialize;

/// Flight status captured every few ticks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DebugSnapshot {
    /// Player is in flight.
    pub flying: bool,
    /// A wing stroke is in progress.
    pub flapping: bool,
    /// A glide is in progress.
    pub gliding: bool,
    /// Both arms were out on this tick.
    pub hands_out: bool,
    /// Down thrust measured this tick.
    pub down_thrust: f32,
    /// Velocity writes are suppressed after an avatar swap.
    pub cannot_fly: bool,
    /// Remaining glide blend-in delay.
    pub glide_delay: f32,
    /// Player stands on ground.
    pub grounded: bool,
    /// Vertical speed.
    pub vertical_speed: f32,
}

impl fmt::Display for DebugSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IsFlying: {}", self.flying)?;
        writeln!(f, "IsFlapping: {}", self.flapping)?;
        writeln!(f, "IsGliding: {}", self.gliding)?;
        writeln!(f, "HandsOut: {}", self.hands_out)?;
        writeln!(f, "DownThrust: {}", self.down_thrust)?;
        writeln!(f, "CannotFly: {}", self.cannot_fly)?;
        writeln!(f, "GlideDelay: {}", self.glide_delay)?;
        writeln!(f, "Grounded: {}", self.grounded)?;
        write!(f, "VerticalSpeed: {}", self.vertical_speed)
    }
}

/// Receives formatted debug text.
pub trait DebugSink {
    /// Replaces the displayed text.
    fn show(&mut self, text: &str);
}

/// Sink that forwards debug text to the `log` facade at debug level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDebugSink;

impl DebugSink for LogDebugSink {
    fn show(&mut self, text: &str) {
        log::debug!("flight status\n{text}");
    }
}
