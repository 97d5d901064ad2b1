//! Input adapters translating player tracking into flight signals.
//!
//! Headset players flap with their arms while desktop players press
//! buttons. Both feed the same [`InputSignals`] into the flight core, which
//! never needs to know which rig produced them.

mod desktop;
mod winged;

pub use desktop::DesktopInput;
pub use winged::WingedInput;

use glam::Vec3;
use serde::Serialize;

use crate::anthropometry::BodyProportions;
use crate::player::PlayerApi;
use crate::profile::FlightProfile;

/// How the local player is controlling their avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum InputContext {
    /// Headset with tracked hands.
    #[default]
    Immersive,
    /// Keyboard and mouse.
    Desktop,
}

impl InputContext {
    /// Reads the context from the player.
    #[must_use]
    pub fn detect(player: &dyn PlayerApi) -> Self {
        if player.is_user_in_vr() {
            Self::Immersive
        } else {
            Self::Desktop
        }
    }
}

/// Per-tick control signals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct InputSignals {
    /// Downward wing motion normalised by body size. Zero when the wings
    /// are not moving down.
    pub down_thrust: f32,
    /// Combined upward displacement produced by the wings this tick.
    pub flap_displacement: Vec3,
    /// Both arms reach away from the body.
    pub hands_out: bool,
    /// Both hands are above their shoulders.
    pub hands_raised: bool,
    /// Wings are spread wide enough to glide.
    pub glide_pose: bool,
    /// Unit vector the wings point along.
    pub wing_direction: Vec3,
    /// Unclamped steering angle in degrees.
    pub banking: f32,
}

/// Source of [`InputSignals`].
pub trait FlightInput {
    /// Samples the signals for one tick of length `dt`.
    fn sample(
        &mut self,
        player: &dyn PlayerApi,
        body: &BodyProportions,
        profile: &FlightProfile,
        dt: f32,
    ) -> InputSignals;

    /// Forgets per-tick history such as previous hand positions.
    fn reset(&mut self);
}

/// The adapter owned by a simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum InputAdapter {
    /// Arm tracking.
    Winged(WingedInput),
    /// Button presses.
    Desktop(DesktopInput),
}

impl InputAdapter {
    /// Builds the adapter matching `context`.
    #[must_use]
    pub fn for_context(context: InputContext) -> Self {
        match context {
            InputContext::Immersive => Self::Winged(WingedInput::default()),
            InputContext::Desktop => Self::Desktop(DesktopInput::default()),
        }
    }

    /// The context this adapter serves.
    #[must_use]
    pub const fn context(&self) -> InputContext {
        match self {
            Self::Winged(_) => InputContext::Immersive,
            Self::Desktop(_) => InputContext::Desktop,
        }
    }
}

impl FlightInput for InputAdapter {
    fn sample(
        &mut self,
        player: &dyn PlayerApi,
        body: &BodyProportions,
        profile: &FlightProfile,
        dt: f32,
    ) -> InputSignals {
        match self {
            Self::Winged(input) => input.sample(player, body, profile, dt),
            Self::Desktop(input) => input.sample(player, body, profile, dt),
        }
    }

    fn reset(&mut self) {
        match self {
            Self::Winged(input) => input.reset(),
            Self::Desktop(input) => input.reset(),
        }
    }
}

/// Armspan used to normalise wing motion.
pub(crate) fn normalized_size(body: &BodyProportions, profile: &FlightProfile) -> f32 {
    if profile.use_avatar_scale {
        body.armspan
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(InputContext::Immersive)]
    #[case(InputContext::Desktop)]
    fn adapter_matches_context(#[case] context: InputContext) {
        assert_eq!(InputAdapter::for_context(context).context(), context);
    }
}
