//! Per-frame entry point wiring permission, contacts and the simulation.
//!
//! Hosts own one [`FlightController`] for the local player, call
//! [`FlightController::update`] once per visual frame and forward mode
//! changes, contacts and avatar swaps as they happen. Permission changes
//! take effect between ticks, never during one.
use std::fmt;

use log::debug;

use crate::contacts::{ContactEvent, ContactReceiver, ContactSender};
use crate::flight::{DebugSink, EventInbox, FlightEvent, FlightSimulation, TickOutcome};
use crate::gating::{EligibilityController, FlightMode, NotificationSink, RigActivation};
use crate::input::{InputAdapter, InputContext};
use crate::player::PlayerApi;
use crate::profile::FlightProfile;
use crate::scheduler::FixedTickScheduler;

/// Owns every flight component for the local player.
pub struct FlightController {
    simulation: FlightSimulation,
    eligibility: EligibilityController,
    receiver: ContactReceiver,
    sender: ContactSender,
    scheduler: FixedTickScheduler,
    debug_sink: Option<Box<dyn DebugSink>>,
    events: EventInbox,
}

impl fmt::Debug for FlightController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlightController")
            .field("simulation", &self.simulation)
            .field("eligibility", &self.eligibility)
            .field("receiver", &self.receiver)
            .field("sender", &self.sender)
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}

impl FlightController {
    /// Creates a controller. Nothing is active until
    /// [`FlightController::start`].
    #[must_use]
    pub fn new(profile: FlightProfile, mode: FlightMode, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            simulation: FlightSimulation::for_context(profile, InputContext::Immersive),
            eligibility: EligibilityController::new(mode, sink),
            receiver: ContactReceiver::default(),
            sender: ContactSender::default(),
            scheduler: FixedTickScheduler::default(),
            debug_sink: None,
            events: EventInbox::default(),
        }
    }

    /// Routes periodic debug text to `sink`.
    #[must_use]
    pub fn with_debug_sink(mut self, sink: Box<dyn DebugSink>) -> Self {
        self.debug_sink = Some(sink);
        self
    }

    /// Uses `scheduler` for fixed ticks.
    #[must_use]
    pub fn with_scheduler(mut self, scheduler: FixedTickScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// The flight simulation.
    #[must_use]
    pub const fn simulation(&self) -> &FlightSimulation {
        &self.simulation
    }

    /// Permission state.
    #[must_use]
    pub const fn eligibility(&self) -> &EligibilityController {
        &self.eligibility
    }

    /// Contact receiver.
    #[must_use]
    pub const fn receiver(&self) -> &ContactReceiver {
        &self.receiver
    }

    /// The player's flying contact.
    #[must_use]
    pub const fn sender(&self) -> &ContactSender {
        &self.sender
    }

    /// The active profile.
    #[must_use]
    pub const fn profile(&self) -> &FlightProfile {
        self.simulation.profile()
    }

    /// Applies the configured mode for the first time.
    pub fn start(&mut self, player: &mut dyn PlayerApi) {
        let mode = self.eligibility.mode();
        self.set_mode(mode, player);
    }

    /// Writes the flight mode and switches rigs to match.
    ///
    /// Entering auto replays a standing contact grant.
    pub fn set_mode(&mut self, mode: FlightMode, player: &mut dyn PlayerApi) {
        let context = InputContext::detect(player);
        let notify = self.profile().notifications;
        let rigs = self.eligibility.set_mode(mode, context, notify);
        self.apply_rigs(rigs, player);
        if mode == FlightMode::Auto && self.receiver.reevaluate() {
            self.apply_gate(true, player);
        }
    }

    /// Turns flight on for everyone.
    pub fn flight_on(&mut self, player: &mut dyn PlayerApi) {
        self.set_mode(FlightMode::On, player);
    }

    /// Turns flight off for everyone.
    pub fn flight_off(&mut self, player: &mut dyn PlayerApi) {
        self.set_mode(FlightMode::Off, player);
    }

    /// Lets avatar contacts decide.
    pub fn flight_auto(&mut self, player: &mut dyn PlayerApi) {
        self.set_mode(FlightMode::Auto, player);
    }

    /// Handles a contact touching the player.
    pub fn contact_enter(&mut self, contact: &ContactEvent, player: &mut dyn PlayerApi) {
        let mut profile = self.profile().clone();
        let signal = self.receiver.on_contact_enter(contact, &mut profile);
        self.simulation.set_profile(&profile);
        if let Some(allowed) = signal {
            self.apply_gate(allowed, player);
        }
    }

    /// Handles a contact leaving the player.
    pub fn contact_exit(&mut self, contact: &ContactEvent, player: &mut dyn PlayerApi) {
        if let Some(allowed) = self.receiver.on_contact_exit(contact) {
            self.apply_gate(allowed, player);
        }
    }

    /// Handles an avatar swap.
    pub fn on_avatar_changed(&mut self) {
        self.simulation.on_avatar_changed();
    }

    /// Refreshes the saved world physics.
    pub fn update_player_physics(&mut self, player: &dyn PlayerApi) {
        self.simulation.update_player_physics(player);
    }

    /// Advances by one visual frame and returns the flight events raised
    /// since the last call.
    pub fn update(&mut self, frame_dt: f32, player: &mut dyn PlayerApi) -> Vec<FlightEvent> {
        if let Some(dt) = self.scheduler.advance(frame_dt) {
            let allowed = self.eligibility.flight_allowed();
            let TickOutcome { events, debug } = self.simulation.tick(dt, player, allowed);
            self.record(events);
            if let (Some(snapshot), Some(sink)) = (debug, self.debug_sink.as_mut()) {
                sink.show(&snapshot.to_string());
            }
        }
        self.simulation.frame_update(frame_dt, player);
        self.drain_events()
    }

    /// Removes and returns events raised outside [`FlightController::update`].
    pub fn drain_events(&mut self) -> Vec<FlightEvent> {
        self.events.drain().collect()
    }

    fn apply_gate(&mut self, allowed: bool, player: &mut dyn PlayerApi) {
        let context = InputContext::detect(player);
        let notify = self.profile().notifications;
        let rigs = if allowed {
            self.eligibility.grant_capability(context, notify)
        } else {
            self.eligibility.revoke_capability(context, notify)
        };
        if let Some(activation) = rigs {
            self.apply_rigs(activation, player);
        }
    }

    fn apply_rigs(&mut self, rigs: RigActivation, player: &mut dyn PlayerApi) {
        match rigs.active() {
            Some(rig) => {
                let context = rig.context();
                if self.simulation.input_context() != context {
                    self.disable_simulation(player);
                    self.simulation.set_input(InputAdapter::for_context(context));
                }
                if !self.simulation.is_enabled() {
                    self.simulation.enable(player);
                    self.scheduler.reset();
                    debug!("{rig:?} rig active");
                }
            }
            None => self.disable_simulation(player),
        }
    }

    fn disable_simulation(&mut self, player: &mut dyn PlayerApi) {
        if self.simulation.is_enabled() {
            self.simulation.disable(player);
            let events = self.simulation.drain_events();
            self.record(events);
        }
    }

    fn record(&mut self, events: Vec<FlightEvent>) {
        for event in events {
            if let FlightEvent::FlyingChanged(flying) = event {
                self.sender.on_flying_changed(flying);
            }
            self.events.push(event);
        }
    }
}
