//! Flight tuning constants shared across the simulation.
//!
//! These values were tuned by hand against how flight feels in a headset.
//! Changing any of them changes the feel of every avatar, so treat them as
//! part of the public behaviour.

/// Fixed simulation period in seconds (20 ticks per second).
pub const TICK_DURATION: f32 = 0.05;
/// Scale applied to hand displacement and friction terms.
pub const FLAP_IMPULSE_SCALE: f32 = 0.011;
/// Flap speed cap expressed as a fraction of the flap strength.
pub const FLAP_SPEED_CAP_FACTOR: f32 = 0.02;
/// Friction removed from over-cap flap speed. This is not a max speed.
pub const FLAP_AIR_FRICTION: f32 = 0.04;
/// Minimum normalised down thrust that starts a flap.
pub const FLAP_START_THRESHOLD: f32 = 0.002;
/// Flap strength modifier used when avatar modifiers are disabled.
pub const UNMODIFIED_FLAP_BONUS: f32 = 10.0;
/// Wingtip offset multiplier folded into the flap strength.
pub const WINGTIP_FLAP_FACTOR: f32 = 8.0;

/// Ticks during which velocity writes are suppressed after an avatar swap.
pub const AVATAR_SWAP_COOLDOWN_TICKS: u32 = 20;
/// Number of ticks between debug snapshots.
pub const DEBUG_INTERVAL_TICKS: u32 = 10;

/// Arms count as "out" beyond `armspan / HANDS_OUT_DIVISOR` from the shoulder.
pub const HANDS_OUT_DIVISOR: f32 = 3.3;
/// Degrees of roll produced per unit of normalised hand height difference.
pub const BANKING_GAIN: f32 = 80.0;
/// Largest banking angle in degrees.
pub const MAX_BANKING_ANGLE: f32 = 45.0;
/// Rate at which the banking rotation speed approaches its goal.
pub const BANKING_RESPONSE: f32 = 6.0;

/// Glide delay applied when a glide starts without a steep descent.
pub const GLIDE_DELAY_START: f32 = 3.0;
/// Glide delay decay per second.
pub const GLIDE_DELAY_DECAY: f32 = 5.0;
/// Vertical speed above which entering a glide arms the glide delay.
pub const GLIDE_DELAY_VERTICAL_SPEED: f32 = -1.0;
/// Glide control lost per unit of weight above 1.
pub const HEAVY_GLIDE_CONTROL_PENALTY: f32 = 0.6;
/// Horizontal speed injected when gliding starts perfectly vertical.
pub const VERTICAL_LOCK_NUDGE: f32 = 0.145;
/// Vertical speed below which the vertical lock nudge may apply.
pub const VERTICAL_LOCK_MAX_Y: f32 = 0.3;

/// Walk, run and strafe speed used to freeze locomotion in flight.
pub const IMMOBILISED_SPEED: f32 = 0.001;

/// Radius of the overlap query used to detect the main menu.
pub const MAIN_MENU_QUERY_RADIUS: f32 = 10.0;
/// Layer mask of the host's menu colliders.
pub const MAIN_MENU_LAYER_MASK: u32 = 2 << 18;
/// Inclusive collider count range that means the main menu is open.
pub const MAIN_MENU_COLLIDER_RANGE: std::ops::RangeInclusive<usize> = 8..=10;
/// Radius of the overlap query used to detect stations.
pub const STATION_QUERY_RADIUS: f32 = 50.0;
/// Layer mask of the local player's own colliders.
pub const STATION_LAYER_MASK: u32 = 2 << 9;

/// Number of ticks a desktop flap stroke lasts.
pub const DESKTOP_FLAP_TICKS: u32 = 5;
/// Combined hand displacement per tick of a desktop flap stroke at armspan 1.
pub const DESKTOP_FLAP_STROKE: f32 = 0.2;
/// Forward share of a desktop flap stroke.
pub const DESKTOP_FLAP_FORWARD: f32 = 0.1;
