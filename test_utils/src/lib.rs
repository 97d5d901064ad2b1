//! Utility helpers for tests.
//!
//! Builders for a tracked avatar, a small driver that steps a controller
//! one fixed tick per frame, and sinks that record what the controller
//! reported.

pub mod rig;
pub mod sinks;

pub use rig::{t_pose_player, Flyer, SHOULDER_HEIGHT};
pub use sinks::{Notification, RecordingDebugSink, RecordingNotifications};

/// Assert that all strings in `keys` are present in `text`.
///
/// # Panics
/// Panics with a helpful message if any key is missing.
pub fn assert_all_present(text: &str, keys: &[&str]) {
    for key in keys {
        assert!(text.contains(key), "{key} not found in output");
    }
}
