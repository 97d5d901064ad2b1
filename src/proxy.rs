//! Collider-count heuristics for host UI and seating state.
//!
//! The host exposes no direct "menu open" or "seated" flags, so both are
//! inferred from sphere overlap queries against layers the host populates
//! in a recognisable way.
use crate::constants::{
    MAIN_MENU_COLLIDER_RANGE, MAIN_MENU_LAYER_MASK, MAIN_MENU_QUERY_RADIUS, STATION_LAYER_MASK,
    STATION_QUERY_RADIUS,
};
use crate::player::{PlayerApi, TrackingPoint};

/// Whether the host's main menu is open around the player's head.
#[must_use]
pub fn is_main_menu_open(player: &dyn PlayerApi) -> bool {
    let head = player.tracking_pose(TrackingPoint::Head).position;
    let hits = player.overlap_sphere(head, MAIN_MENU_QUERY_RADIUS, MAIN_MENU_LAYER_MASK);
    MAIN_MENU_COLLIDER_RANGE.contains(&hits.count)
}

/// Whether the player is sitting in a station.
///
/// Seated players lose their own colliders, so an empty query means
/// seated. A collider that cannot be resolved means the player is not.
#[must_use]
pub fn is_player_in_station(player: &dyn PlayerApi) -> bool {
    let hits = player.overlap_sphere(player.position(), STATION_QUERY_RADIUS, STATION_LAYER_MASK);
    if hits.any_unresolved {
        return false;
    }
    hits.count == 0
}
