//! Button input for desktop players.
use glam::Vec3;

use super::{normalized_size, FlightInput, InputSignals};
use crate::anthropometry::BodyProportions;
use crate::constants::{DESKTOP_FLAP_FORWARD, DESKTOP_FLAP_STROKE, DESKTOP_FLAP_TICKS};
use crate::player::{FlightButton, PlayerApi, TrackingPoint};
use crate::profile::FlightProfile;
use crate::vector_math::normalize_or_zero;

/// Turns a flap button press into a short scripted wing stroke.
///
/// Each press starts a stroke lasting [`DESKTOP_FLAP_TICKS`] ticks. Holding
/// the button does not repeat it. The glide button holds the glide pose
/// and the head steers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopInput {
    flap_was_held: bool,
    stroke_ticks_left: u32,
}

impl DesktopInput {
    /// Whether a flap stroke is in progress.
    #[must_use]
    pub const fn is_stroking(&self) -> bool {
        self.stroke_ticks_left > 0
    }
}

impl FlightInput for DesktopInput {
    fn sample(
        &mut self,
        player: &dyn PlayerApi,
        body: &BodyProportions,
        profile: &FlightProfile,
        dt: f32,
    ) -> InputSignals {
        let flap_held = player.is_button_held(FlightButton::Flap);
        if flap_held && !self.flap_was_held {
            self.stroke_ticks_left = DESKTOP_FLAP_TICKS;
        }
        self.flap_was_held = flap_held;

        let head_forward = normalize_or_zero(player.tracking_pose(TrackingPoint::Head).forward());
        let level_forward = normalize_or_zero(Vec3::new(head_forward.x, 0.0, head_forward.z));
        let glide_held = player.is_button_held(FlightButton::Glide);
        let stroking = self.is_stroking();

        let (down_thrust, flap_displacement) = if stroking {
            self.stroke_ticks_left -= 1;
            let size = normalized_size(body, profile).max(0.0);
            let stroke = Vec3::Y * DESKTOP_FLAP_STROKE + level_forward * DESKTOP_FLAP_FORWARD;
            (DESKTOP_FLAP_STROKE * dt, stroke * size)
        } else {
            (0.0, Vec3::ZERO)
        };

        InputSignals {
            down_thrust,
            flap_displacement,
            hands_out: stroking || glide_held,
            hands_raised: stroking,
            glide_pose: glide_held,
            wing_direction: head_forward,
            banking: 0.0,
        }
    }

    fn reset(&mut self) {
        self.flap_was_held = false;
        self.stroke_ticks_left = 0;
    }
}
