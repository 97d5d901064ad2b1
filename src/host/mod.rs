//! Bevy integration for avatar flight.
//!
//! This module re-exports the plugin, the non-send runtime and the player
//! mirror hosts fill from their tracking sources.

mod host_player;
mod plugin;

pub use host_player::HostPlayer;
pub use plugin::{
    advance_flight_system, init_flight_runtime, FlightPlugin, FlightRequest, FlightRequests,
    FlightRuntime, FlightStateChanged,
};

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::prelude::World;
    use rstest::rstest;

    use crate::gating::FlightMode;
    use crate::profile::FlightProfile;

    #[rstest]
    fn init_exposes_runtime() {
        let mut world = World::new();
        init_flight_runtime(
            &mut world,
            FlightRuntime::new(FlightProfile::default(), FlightMode::Off, HostPlayer::default()),
        );
        assert!(world.get_non_send_resource::<FlightRuntime>().is_some());
    }

    #[rstest]
    fn requests_start_empty() {
        assert!(FlightRequests::default().is_empty());
    }
}
