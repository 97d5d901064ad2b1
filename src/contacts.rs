//! Contact tags avatars use to talk to the flight system.
//!
//! Avatars carry contact senders tagged with well-known names. When one
//! touches the local player's receiver, each tag either grants or revokes
//! flight, toggles a profile flag, or sets a profile value from how far the
//! sender sits from the receiver along one axis. The tag names are resolved
//! through a table built once, so an event never compares raw strings.
use std::str::FromStr;

use glam::Vec3;
use hashbrown::HashMap;
use log::{debug, warn};
use once_cell::sync::Lazy;
use thiserror::Error;

use crate::numeric::{lerp_clamped, truncate_to_i32};
use crate::profile::FlightProfile;

/// Every tag the receiver understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactTag {
    /// Force notifications on.
    NotificationsOn,
    /// Force notifications off.
    NotificationsOff,
    /// Require a jump before flapping.
    JumpFlyOn,
    /// Allow flapping from the ground.
    JumpFlyOff,
    /// Steer glides by banking.
    BankingOn,
    /// Steer glides by turning the wings.
    BankingOff,
    /// Wingtip offset from the sender's x offset.
    WingOffsetMod,
    /// Flap strength from the sender's y offset.
    FlapStrengthMod,
    /// Air friction from the sender's z offset.
    FrictionMod,
    /// Allow flight.
    CanFly,
    /// Forbid flight.
    CanNotFly,
}

/// A tag name with no meaning to the receiver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown contact tag `{0}`")]
pub struct UnknownTag(pub String);

static TAGS_BY_NAME: Lazy<HashMap<&'static str, ContactTag>> =
    Lazy::new(|| ContactTag::ALL.iter().map(|tag| (tag.name(), *tag)).collect());

impl ContactTag {
    /// Every tag.
    pub const ALL: [Self; 11] = [
        Self::NotificationsOn,
        Self::NotificationsOff,
        Self::JumpFlyOn,
        Self::JumpFlyOff,
        Self::BankingOn,
        Self::BankingOff,
        Self::WingOffsetMod,
        Self::FlapStrengthMod,
        Self::FrictionMod,
        Self::CanFly,
        Self::CanNotFly,
    ];

    /// The tag's name on the avatar.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NotificationsOn => "OF_NotisOn",
            Self::NotificationsOff => "OF_NotisOff",
            Self::JumpFlyOn => "OF_JumpFlyOn",
            Self::JumpFlyOff => "OF_JumpFlyOff",
            Self::BankingOn => "OF_BankingOn",
            Self::BankingOff => "OF_BankingOff",
            Self::WingOffsetMod => "OF_WingOffsetMod",
            Self::FlapStrengthMod => "OF_FlapStrengthMod",
            Self::FrictionMod => "OF_FrictionMod",
            Self::CanFly => "OF_CanFly",
            Self::CanNotFly => "OF_CanNotFly",
        }
    }

    /// What the tag does.
    #[must_use]
    pub const fn binding(self) -> TagBinding {
        match self {
            Self::NotificationsOn => TagBinding::Toggle {
                field: FlagField::Notifications,
                value: true,
            },
            Self::NotificationsOff => TagBinding::Toggle {
                field: FlagField::Notifications,
                value: false,
            },
            Self::JumpFlyOn => TagBinding::Toggle {
                field: FlagField::RequireJump,
                value: true,
            },
            Self::JumpFlyOff => TagBinding::Toggle {
                field: FlagField::RequireJump,
                value: false,
            },
            Self::BankingOn => TagBinding::Toggle {
                field: FlagField::BankingTurns,
                value: true,
            },
            Self::BankingOff => TagBinding::Toggle {
                field: FlagField::BankingTurns,
                value: false,
            },
            Self::WingOffsetMod => TagBinding::Modify {
                field: ScalarField::WingtipOffset,
                transform: AxisLerp::new(Axis::X, 0.0, 40.0),
            },
            Self::FlapStrengthMod => TagBinding::Modify {
                field: ScalarField::FlapStrengthBase,
                transform: AxisLerp::new(Axis::Y, 100.0, 800.0),
            },
            Self::FrictionMod => TagBinding::Modify {
                field: ScalarField::AirFriction,
                transform: AxisLerp::new(Axis::Z, 0.0, 0.2),
            },
            Self::CanFly => TagBinding::Gate(true),
            Self::CanNotFly => TagBinding::Gate(false),
        }
    }
}

impl FromStr for ContactTag {
    type Err = UnknownTag;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        TAGS_BY_NAME
            .get(name)
            .copied()
            .ok_or_else(|| UnknownTag(name.to_owned()))
    }
}

/// Boolean profile fields a tag can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagField {
    /// [`FlightProfile::notifications`].
    Notifications,
    /// [`FlightProfile::require_jump`].
    RequireJump,
    /// [`FlightProfile::banking_turns`].
    BankingTurns,
}

/// Numeric profile fields a tag can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    /// [`FlightProfile::wingtip_offset`].
    WingtipOffset,
    /// [`FlightProfile::flap_strength_base`], truncated to an integer.
    FlapStrengthBase,
    /// [`FlightProfile::air_friction`].
    AirFriction,
}

/// World axis read from the sender offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left-right.
    X,
    /// Up-down.
    Y,
    /// Forward-back.
    Z,
}

/// Interpolates between two values by the absolute sender offset along an
/// axis, clamped to one unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLerp {
    /// Axis the offset is read from.
    pub axis: Axis,
    /// Value at zero offset.
    pub from: f32,
    /// Value at an offset of one unit or more.
    pub to: f32,
}

impl AxisLerp {
    /// Creates the transform.
    #[must_use]
    pub const fn new(axis: Axis, from: f32, to: f32) -> Self {
        Self { axis, from, to }
    }

    /// Value for a sender sitting `offset` away from the receiver.
    #[must_use]
    pub fn evaluate(&self, offset: Vec3) -> f32 {
        let along = match self.axis {
            Axis::X => offset.x,
            Axis::Y => offset.y,
            Axis::Z => offset.z,
        };
        lerp_clamped(self.from, self.to, along.abs())
    }
}

/// Effect of a tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TagBinding {
    /// Grant (`true`) or revoke (`false`) flight.
    Gate(bool),
    /// Set a flag.
    Toggle {
        /// Field written.
        field: FlagField,
        /// Value written.
        value: bool,
    },
    /// Set a number from the sender offset.
    Modify {
        /// Field written.
        field: ScalarField,
        /// How the offset maps to a value.
        transform: AxisLerp,
    },
}

impl TagBinding {
    /// Applies a profile modification. Gates leave the profile alone.
    pub fn apply(&self, offset: Vec3, profile: &mut FlightProfile) {
        match *self {
            Self::Gate(_) => {}
            Self::Toggle { field, value } => match field {
                FlagField::Notifications => profile.notifications = value,
                FlagField::RequireJump => profile.require_jump = value,
                FlagField::BankingTurns => profile.banking_turns = value,
            },
            Self::Modify { field, transform } => {
                let value = transform.evaluate(offset);
                match field {
                    ScalarField::WingtipOffset => profile.wingtip_offset = value,
                    ScalarField::FlapStrengthBase => {
                        profile.flap_strength_base = truncate_to_i32(value);
                    }
                    ScalarField::AirFriction => profile.air_friction = value,
                }
            }
        }
    }
}

/// A contact touching the local player's receiver.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactEvent {
    /// Tags carried by the sender.
    pub tags: Vec<String>,
    /// World position of the sender.
    pub sender_position: Vec3,
    /// World position of the receiver.
    pub receiver_position: Vec3,
    /// Whether the sender belongs to the local player.
    pub from_local_player: bool,
}

impl ContactEvent {
    /// A contact from the local player's own avatar.
    #[must_use]
    pub fn local<I, S>(tags: I, sender_position: Vec3, receiver_position: Vec3) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            sender_position,
            receiver_position,
            from_local_player: true,
        }
    }

    /// Sender position relative to the receiver.
    #[must_use]
    pub fn offset(&self) -> Vec3 {
        self.sender_position - self.receiver_position
    }
}

/// Turns contacts into profile changes and gate signals.
///
/// Remembers the last gate signal so that losing the contact can apply
/// the opposite one. Before any gate tag arrives the last signal counts
/// as a denial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactReceiver {
    last_signal: bool,
}

impl ContactReceiver {
    /// Last gate signal seen, `true` for a grant.
    #[must_use]
    pub const fn last_signal(&self) -> bool {
        self.last_signal
    }

    /// Handles a contact starting.
    ///
    /// Profile tags are applied in order. Among gate tags the last one
    /// wins, and the returned signal is what the gate should do.
    pub fn on_contact_enter(
        &mut self,
        contact: &ContactEvent,
        profile: &mut FlightProfile,
    ) -> Option<bool> {
        if !contact.from_local_player {
            return None;
        }
        let offset = contact.offset();
        let mut signal = None;
        for name in &contact.tags {
            match name.parse::<ContactTag>() {
                Ok(tag) => match tag.binding() {
                    TagBinding::Gate(allowed) => signal = Some(allowed),
                    binding => binding.apply(offset, profile),
                },
                Err(error) => warn!("{error}; ignoring"),
            }
        }
        if let Some(allowed) = signal {
            debug!("contact {} flight", if allowed { "grants" } else { "revokes" });
            self.last_signal = allowed;
        }
        signal
    }

    /// Handles a contact ending by returning the opposite of the last gate
    /// signal.
    pub fn on_contact_exit(&mut self, contact: &ContactEvent) -> Option<bool> {
        if !contact.from_local_player {
            return None;
        }
        let reverted = !self.last_signal;
        debug!("contact lost; {} flight", if reverted { "granting" } else { "revoking" });
        Some(reverted)
    }

    /// Replays the last gate signal, used when the mode returns to auto.
    #[must_use]
    pub const fn reevaluate(&self) -> bool {
        self.last_signal
    }
}

/// The local player's own sender, telling other avatars it is flying.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContactSender {
    enabled: bool,
}

impl ContactSender {
    /// Whether the sender is broadcasting.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Broadcasts while the player is flying.
    pub fn on_flying_changed(&mut self, flying: bool) {
        self.enabled = flying;
        debug!("flying contact {}", if flying { "enabled" } else { "disabled" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    fn every_tag_round_trips_through_its_name() {
        for tag in ContactTag::ALL {
            assert_eq!(tag.name().parse::<ContactTag>(), Ok(tag));
        }
    }

    #[rstest]
    fn unknown_names_are_errors() {
        assert_eq!(
            "OF_Teleport".parse::<ContactTag>(),
            Err(UnknownTag("OF_Teleport".to_owned()))
        );
    }

    #[rstest]
    #[case::wing_offset("OF_WingOffsetMod", Vec3::new(-0.5, 9.0, 9.0))]
    #[case::flap_strength("OF_FlapStrengthMod", Vec3::new(9.0, 0.25, 9.0))]
    #[case::friction("OF_FrictionMod", Vec3::new(9.0, 9.0, 0.5))]
    fn modifiers_read_their_axis(#[case] name: &str, #[case] offset: Vec3) {
        let mut profile = FlightProfile::default();
        let contact = ContactEvent::local([name], offset, Vec3::ZERO);
        let signal = ContactReceiver::default().on_contact_enter(&contact, &mut profile);
        assert_eq!(signal, None);
        match name {
            "OF_WingOffsetMod" => assert_relative_eq!(profile.wingtip_offset, 20.0),
            "OF_FlapStrengthMod" => assert_eq!(profile.flap_strength_base, 275),
            _ => assert_relative_eq!(profile.air_friction, 0.1),
        }
    }

    #[rstest]
    fn last_gate_tag_wins() {
        let mut profile = FlightProfile::default();
        let mut receiver = ContactReceiver::default();
        let contact = ContactEvent::local(["OF_CanFly", "OF_CanNotFly"], Vec3::ZERO, Vec3::ZERO);
        assert_eq!(receiver.on_contact_enter(&contact, &mut profile), Some(false));
        assert!(!receiver.last_signal());
    }

    #[rstest]
    fn exit_reverts_last_signal() {
        let mut profile = FlightProfile::default();
        let mut receiver = ContactReceiver::default();
        let contact = ContactEvent::local(["OF_CanFly"], Vec3::ZERO, Vec3::ZERO);
        receiver.on_contact_enter(&contact, &mut profile);
        assert_eq!(receiver.on_contact_exit(&contact), Some(false));
        assert!(receiver.reevaluate());
    }

    #[rstest]
    fn exit_before_any_gate_grants() {
        let mut receiver = ContactReceiver::default();
        let contact = ContactEvent::local(["OF_BankingOff"], Vec3::ZERO, Vec3::ZERO);
        assert!(!receiver.last_signal());
        assert_eq!(receiver.on_contact_exit(&contact), Some(true));
    }

    #[rstest]
    fn exit_from_other_players_is_ignored() {
        let mut receiver = ContactReceiver::default();
        let contact = ContactEvent {
            from_local_player: false,
            ..ContactEvent::local(["OF_CanFly"], Vec3::ZERO, Vec3::ZERO)
        };
        assert_eq!(receiver.on_contact_exit(&contact), None);
    }

    #[rstest]
    fn toggles_and_unknown_tags() {
        let mut profile = FlightProfile::default();
        let contact = ContactEvent::local(
            ["OF_NotisOff", "OF_Sparkles", "OF_JumpFlyOff", "OF_BankingOff"],
            Vec3::ZERO,
            Vec3::ZERO,
        );
        ContactReceiver::default().on_contact_enter(&contact, &mut profile);
        assert!(!profile.notifications);
        assert!(!profile.require_jump);
        assert!(!profile.banking_turns);
    }

    #[rstest]
    fn other_players_are_ignored() {
        let mut profile = FlightProfile::default();
        let mut receiver = ContactReceiver::default();
        let contact = ContactEvent {
            from_local_player: false,
            ..ContactEvent::local(["OF_CanFly", "OF_NotisOff"], Vec3::ZERO, Vec3::ZERO)
        };
        assert_eq!(receiver.on_contact_enter(&contact, &mut profile), None);
        assert!(profile.notifications);
        assert!(!receiver.last_signal());
    }

    #[rstest]
    fn sender_follows_flight() {
        let mut sender = ContactSender::default();
        assert!(!sender.is_enabled());
        sender.on_flying_changed(true);
        assert!(sender.is_enabled());
    }
}
