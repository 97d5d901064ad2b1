//! Flight state changes reported to the host.
use serde::Serialize;

use super::debug::DebugSnapshot;

/// A flight flag that changed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FlightEvent {
    /// The player took off (`true`) or landed (`false`).
    FlyingChanged(bool),
    /// A wing stroke started or ended.
    FlappingChanged(bool),
    /// A glide started or ended.
    GlidingChanged(bool),
}

/// Events waiting to be handed to the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventInbox {
    events: Vec<FlightEvent>,
}

impl EventInbox {
    /// Queues an event.
    pub fn push(&mut self, event: FlightEvent) {
        self.events.push(event);
    }

    /// Removes and returns every queued event in order.
    pub fn drain(&mut self) -> std::vec::Drain<'_, FlightEvent> {
        self.events.drain(..)
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// What a tick produced besides the velocity write.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    /// Flag changes in the order they happened.
    pub events: Vec<FlightEvent>,
    /// Periodic status snapshot, when one was due.
    pub debug: Option<DebugSnapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn drain_preserves_order_and_empties() {
        let mut inbox = EventInbox::default();
        assert!(inbox.is_empty());
        inbox.push(FlightEvent::FlappingChanged(true));
        inbox.push(FlightEvent::FlyingChanged(true));
        let drained: Vec<_> = inbox.drain().collect();
        assert_eq!(
            drained,
            vec![
                FlightEvent::FlappingChanged(true),
                FlightEvent::FlyingChanged(true)
            ]
        );
        assert!(inbox.is_empty());
    }
}
