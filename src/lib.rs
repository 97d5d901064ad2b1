#![cfg_attr(docsrs, feature(doc_cfg))]
//! Flapping, gliding and banking flight for VR avatars.
//!
//! The crate turns a player's tracked arm motion into flight. A
//! [`FlightController`] owns the per-player state machine, the permission
//! gate and the contact receiver; hosts drive it once per frame through
//! any [`PlayerApi`] implementation or through the Bevy [`FlightPlugin`].
pub mod anthropometry;
pub mod constants;
pub mod contacts;
pub mod controller;
pub mod curve;
pub mod flight;
pub mod gating;
pub mod host;
pub mod input;
pub mod logging;
pub mod numeric;
pub mod player;
pub mod profile;
pub mod proxy;
pub mod scheduler;
pub mod tuning;
pub mod vector_math;

// Re-export commonly used items
pub use anthropometry::BodyProportions;
pub use contacts::{ContactEvent, ContactReceiver, ContactSender, ContactTag};
pub use controller::FlightController;
pub use curve::{Keyframe, ResponseCurve};
pub use flight::{FlightEvent, FlightPhase, FlightSimulation};
pub use gating::{EligibilityController, FlightMode, NotificationSink};
pub use host::{FlightPlugin, FlightRequest, FlightRequests, FlightRuntime, HostPlayer};
pub use input::{InputAdapter, InputContext};
pub use logging::init as init_logging;
pub use player::{Bone, FlightButton, PlayerApi, Pose, TrackingPoint};
pub use profile::{FlightProfile, ProfileError};
pub use scheduler::FixedTickScheduler;
pub use tuning::DerivedConstants;

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use avatar_flight::prelude::*;
    //! ```

    pub use crate::ContactEvent;
    pub use crate::FlightController;
    pub use crate::FlightEvent;
    pub use crate::FlightMode;
    pub use crate::FlightPlugin;
    pub use crate::FlightProfile;
    pub use crate::HostPlayer;
    pub use crate::PlayerApi;
    pub use glam::{Quat, Vec3};
}
