//! Sinks that remember what they were told.
use std::sync::{Arc, Mutex};

use avatar_flight::flight::DebugSink;
use avatar_flight::gating::NotificationSink;

/// A capability notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Flight became available.
    Capable,
    /// Flight became unavailable.
    NotCapable,
}

/// Notification sink sharing its log with the test.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifications {
    log: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifications {
    /// Notifications received so far.
    pub fn received(&self) -> Vec<Notification> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// A boxed handle writing into the same log.
    pub fn boxed(&self) -> Box<dyn NotificationSink> {
        Box::new(self.clone())
    }

    fn record(&self, notification: Notification) {
        if let Ok(mut log) = self.log.lock() {
            log.push(notification);
        }
    }
}

impl NotificationSink for RecordingNotifications {
    fn notify_flight_capable(&mut self) {
        self.record(Notification::Capable);
    }

    fn notify_not_flight_capable(&mut self) {
        self.record(Notification::NotCapable);
    }
}

/// Debug sink keeping every text it was shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingDebugSink {
    shown: Arc<Mutex<Vec<String>>>,
}

impl RecordingDebugSink {
    /// Texts shown so far.
    pub fn shown(&self) -> Vec<String> {
        self.shown.lock().map(|shown| shown.clone()).unwrap_or_default()
    }

    /// A boxed handle writing into the same log.
    pub fn boxed(&self) -> Box<dyn DebugSink> {
        Box::new(self.clone())
    }
}

impl DebugSink for RecordingDebugSink {
    fn show(&mut self, text: &str) {
        if let Ok(mut shown) = self.shown.lock() {
            shown.push(text.to_owned());
        }
    }
}
