//! Flight permission and rig selection.
//!
//! The world owner picks a [`FlightMode`]. In [`FlightMode::Auto`] the
//! avatar decides through contact signals whether it may fly. Every change
//! activates at most one flight rig, chosen from the player's input
//! context at the moment of the switch, and reports the resulting
//! capability to a [`NotificationSink`].
use std::fmt;

use log::info;
use serde::{Deserialize, Serialize};

use crate::input::InputContext;

/// Owner-selected flight permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FlightMode {
    /// Nobody flies.
    Off,
    /// The avatar's contacts decide.
    #[default]
    Auto,
    /// Everyone flies.
    On,
}

impl fmt::Display for FlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Off => "Off",
            Self::Auto => "Auto",
            Self::On => "On",
        };
        f.write_str(name)
    }
}

/// The two mutually exclusive flight rigs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RigKind {
    /// Arm-flapping rig for headset players.
    Winged,
    /// Button rig for desktop players.
    Desktop,
}

impl RigKind {
    /// The rig serving `context`.
    #[must_use]
    pub const fn for_context(context: InputContext) -> Self {
        match context {
            InputContext::Immersive => Self::Winged,
            InputContext::Desktop => Self::Desktop,
        }
    }

    /// The context this rig serves.
    #[must_use]
    pub const fn context(self) -> InputContext {
        match self {
            Self::Winged => InputContext::Immersive,
            Self::Desktop => InputContext::Desktop,
        }
    }
}

/// Which rig is active. At most one is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RigActivation {
    active: Option<RigKind>,
}

impl RigActivation {
    /// The active rig, if any.
    #[must_use]
    pub const fn active(self) -> Option<RigKind> {
        self.active
    }

    /// Whether the winged rig is active.
    #[must_use]
    pub const fn winged(self) -> bool {
        matches!(self.active, Some(RigKind::Winged))
    }

    /// Whether the desktop rig is active.
    #[must_use]
    pub const fn desktop(self) -> bool {
        matches!(self.active, Some(RigKind::Desktop))
    }
}

/// Receives capability notifications for the HUD.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink {
    /// The player can now fly.
    fn notify_flight_capable(&mut self);
    /// The player can no longer fly.
    fn notify_not_flight_capable(&mut self);
}

/// Sink that reports notifications through the `log` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotificationSink;

impl NotificationSink for LogNotificationSink {
    fn notify_flight_capable(&mut self) {
        info!("flight available");
    }

    fn notify_not_flight_capable(&mut self) {
        info!("flight unavailable");
    }
}

/// Tracks the mode, the derived permission and the active rig.
pub struct EligibilityController {
    mode: FlightMode,
    flight_allowed: bool,
    rigs: RigActivation,
    sink: Box<dyn NotificationSink>,
}

impl fmt::Debug for EligibilityController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EligibilityController")
            .field("mode", &self.mode)
            .field("flight_allowed", &self.flight_allowed)
            .field("rigs", &self.rigs)
            .finish_non_exhaustive()
    }
}

impl EligibilityController {
    /// Creates a controller in `mode` with no rig active.
    ///
    /// Call [`EligibilityController::set_mode`] to apply the mode.
    #[must_use]
    pub fn new(mode: FlightMode, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            mode,
            flight_allowed: false,
            rigs: RigActivation::default(),
            sink,
        }
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> FlightMode {
        self.mode
    }

    /// Whether the player may fly.
    #[must_use]
    pub const fn flight_allowed(&self) -> bool {
        self.flight_allowed
    }

    /// Active rig.
    #[must_use]
    pub const fn rigs(&self) -> RigActivation {
        self.rigs
    }

    /// Writes the mode. Any transition is allowed.
    ///
    /// `On` activates the rig for `context`; `Off` and `Auto` deactivate
    /// every rig until a capability grant. When `notify` is set the sink
    /// hears the resulting capability.
    pub fn set_mode(&mut self, mode: FlightMode, context: InputContext, notify: bool) -> RigActivation {
        self.mode = mode;
        let rigs = self.switch_flight(mode == FlightMode::On, context);
        self.notify(notify);
        info!("flight mode set to {mode}");
        rigs
    }

    /// Lets the avatar fly. Only acts in [`FlightMode::Auto`].
    ///
    /// Returns the new rig activation when anything changed hands.
    pub fn grant_capability(&mut self, context: InputContext, notify: bool) -> Option<RigActivation> {
        self.auto_switch(true, context, notify)
    }

    /// Stops the avatar flying. Only acts in [`FlightMode::Auto`].
    pub fn revoke_capability(&mut self, context: InputContext, notify: bool) -> Option<RigActivation> {
        self.auto_switch(false, context, notify)
    }

    fn auto_switch(&mut self, allowed: bool, context: InputContext, notify: bool) -> Option<RigActivation> {
        if self.mode != FlightMode::Auto {
            return None;
        }
        let rigs = self.switch_flight(allowed, context);
        self.notify(notify);
        Some(rigs)
    }

    fn switch_flight(&mut self, allowed: bool, context: InputContext) -> RigActivation {
        self.flight_allowed = allowed;
        self.rigs = RigActivation {
            active: allowed.then_some(RigKind::for_context(context)),
        };
        self.rigs
    }

    fn notify(&mut self, notify: bool) {
        if !notify {
            return;
        }
        if self.flight_allowed {
            self.sink.notify_flight_capable();
        } else {
            self.sink.notify_not_flight_capable();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn quiet() -> Box<dyn NotificationSink> {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify_flight_capable().never();
        sink.expect_notify_not_flight_capable().never();
        Box::new(sink)
    }

    #[rstest]
    #[case::on_immersive(FlightMode::On, InputContext::Immersive, Some(RigKind::Winged))]
    #[case::on_desktop(FlightMode::On, InputContext::Desktop, Some(RigKind::Desktop))]
    #[case::auto(FlightMode::Auto, InputContext::Immersive, None)]
    #[case::off(FlightMode::Off, InputContext::Desktop, None)]
    fn mode_selects_rig(
        #[case] mode: FlightMode,
        #[case] context: InputContext,
        #[case] expected: Option<RigKind>,
    ) {
        let mut gate = EligibilityController::new(FlightMode::Off, quiet());
        let rigs = gate.set_mode(mode, context, false);
        assert_eq!(rigs.active(), expected);
        assert_eq!(gate.flight_allowed(), expected.is_some());
    }

    #[rstest]
    fn rigs_are_exclusive() {
        let mut gate = EligibilityController::new(FlightMode::Auto, quiet());
        gate.set_mode(FlightMode::On, InputContext::Immersive, false);
        let rigs = gate.set_mode(FlightMode::On, InputContext::Desktop, false);
        assert!(rigs.desktop());
        assert!(!rigs.winged());
    }

    #[rstest]
    #[case::off(FlightMode::Off)]
    #[case::on(FlightMode::On)]
    fn capability_ignored_outside_auto(#[case] mode: FlightMode) {
        let mut gate = EligibilityController::new(mode, quiet());
        gate.set_mode(mode, InputContext::Immersive, false);
        let before = gate.flight_allowed();
        assert_eq!(gate.grant_capability(InputContext::Immersive, true), None);
        assert_eq!(gate.revoke_capability(InputContext::Immersive, true), None);
        assert_eq!(gate.flight_allowed(), before);
    }

    #[rstest]
    fn every_mode_write_notifies() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify_flight_capable().times(2).return_const(());
        sink.expect_notify_not_flight_capable().times(2).return_const(());
        let mut gate = EligibilityController::new(FlightMode::Auto, Box::new(sink));
        gate.set_mode(FlightMode::On, InputContext::Immersive, true);
        gate.set_mode(FlightMode::On, InputContext::Immersive, true);
        gate.set_mode(FlightMode::Off, InputContext::Immersive, true);
        gate.set_mode(FlightMode::Auto, InputContext::Immersive, true);
    }

    #[rstest]
    fn auto_grant_and_revoke_notify() {
        let mut sink = MockNotificationSink::new();
        sink.expect_notify_flight_capable().times(1).return_const(());
        sink.expect_notify_not_flight_capable().times(1).return_const(());
        let mut gate = EligibilityController::new(FlightMode::Auto, Box::new(sink));
        let granted = gate.grant_capability(InputContext::Desktop, true);
        assert!(granted.is_some_and(RigActivation::desktop));
        assert!(gate.flight_allowed());
        gate.revoke_capability(InputContext::Desktop, true);
        assert!(!gate.flight_allowed());
    }

    #[rstest]
    fn mode_names() {
        assert_eq!(FlightMode::Auto.to_string(), "Auto");
        assert_eq!(FlightMode::default(), FlightMode::Auto);
    }
}
