//! Bevy plugin driving the flight controller once per frame.

use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{debug, info};

use crate::contacts::ContactEvent;
use crate::controller::FlightController;
use crate::flight::{FlightEvent, LogDebugSink};
use crate::gating::{FlightMode, LogNotificationSink};
use crate::profile::FlightProfile;

use super::HostPlayer;

/// Event raised for every flight flag change.
///
/// Observers see changes in the order the simulation produced them.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlightStateChanged(pub FlightEvent);

/// Work queued by the host for the next frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FlightRequest {
    /// Write the owner's flight mode.
    SetMode(FlightMode),
    /// An avatar contact touched the player.
    ContactEnter(ContactEvent),
    /// An avatar contact left the player.
    ContactExit(ContactEvent),
    /// The player changed avatar.
    AvatarChanged,
    /// The world changed the player's gravity or speeds.
    PhysicsChanged,
}

/// Requests applied before the next flight update.
///
/// Systems and UI code push here instead of touching the non-send
/// [`FlightRuntime`] directly.
#[derive(Resource, Debug, Default)]
pub struct FlightRequests {
    pending: Vec<FlightRequest>,
}

impl FlightRequests {
    /// Queues a request.
    pub fn push(&mut self, request: FlightRequest) {
        self.pending.push(request);
    }

    /// Removes every queued request in arrival order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, FlightRequest> {
        self.pending.drain(..)
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Non-send resource owning the controller and the player mirror.
///
/// The controller holds boxed notification and debug sinks that are not
/// `Send`, so the runtime lives outside the parallel resource set.
#[derive(Debug)]
pub struct FlightRuntime {
    controller: FlightController,
    player: HostPlayer,
}

impl FlightRuntime {
    /// Builds a runtime that logs notifications and debug text.
    #[must_use]
    pub fn new(profile: FlightProfile, mode: FlightMode, player: HostPlayer) -> Self {
        let controller = FlightController::new(profile, mode, Box::new(LogNotificationSink))
            .with_debug_sink(Box::new(LogDebugSink));
        Self { controller, player }
    }

    /// Applies the configured mode.
    pub fn start(&mut self) {
        self.controller.start(&mut self.player);
    }

    /// The controller.
    #[must_use]
    pub const fn controller(&self) -> &FlightController {
        &self.controller
    }

    /// The player mirror.
    #[must_use]
    pub const fn player(&self) -> &HostPlayer {
        &self.player
    }

    /// Mutable access for the host to refresh tracking data.
    pub const fn player_mut(&mut self) -> &mut HostPlayer {
        &mut self.player
    }

    /// Applies one queued request.
    pub fn apply(&mut self, request: FlightRequest) {
        let Self { controller, player } = self;
        match request {
            FlightRequest::SetMode(mode) => controller.set_mode(mode, player),
            FlightRequest::ContactEnter(contact) => controller.contact_enter(&contact, player),
            FlightRequest::ContactExit(contact) => controller.contact_exit(&contact, player),
            FlightRequest::AvatarChanged => controller.on_avatar_changed(),
            FlightRequest::PhysicsChanged => controller.update_player_physics(player),
        }
    }

    /// Advances the controller by one frame.
    pub fn update(&mut self, frame_dt: f32) -> Vec<FlightEvent> {
        self.controller.update(frame_dt, &mut self.player)
    }
}

/// Initialises the [`FlightRuntime`] resource in the provided [`World`].
pub fn init_flight_runtime(world: &mut World, mut runtime: FlightRuntime) {
    runtime.start();
    world.insert_non_send_resource(runtime);
}

/// Applies queued requests, advances the controller and raises a
/// [`FlightStateChanged`] for every resulting flag change.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn advance_flight_system(
    time: Res<Time>,
    mut requests: ResMut<FlightRequests>,
    mut runtime: NonSendMut<FlightRuntime>,
    mut commands: Commands,
) {
    for request in requests.drain() {
        runtime.apply(request);
    }
    let mut events = runtime.controller.drain_events();
    events.extend(runtime.update(time.delta_secs()));
    for event in events {
        commands.trigger(FlightStateChanged(event));
    }
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_flight_state(event: On<FlightStateChanged>) {
    let FlightStateChanged(change) = event.event();
    match change {
        FlightEvent::FlyingChanged(true) => info!("took off"),
        FlightEvent::FlyingChanged(false) => info!("landed"),
        other => debug!("{other:?}"),
    }
}

/// Bevy plugin running avatar flight for the local player.
#[derive(Debug, Clone, Default)]
pub struct FlightPlugin {
    /// Profile of the avatar worn at startup.
    pub profile: FlightProfile,
    /// Initial flight mode.
    pub mode: FlightMode,
    /// Initial player state.
    pub player: HostPlayer,
}

impl Plugin for FlightPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(log_flight_state);
        app.init_resource::<FlightRequests>();
        init_flight_runtime(
            app.world_mut(),
            FlightRuntime::new(self.profile.clone(), self.mode, self.player.clone()),
        );
        app.add_systems(Update, advance_flight_system);
    }
}
