//! Event sink adapters.

use crate::events::GovernanceEvent;
use crate::ports::outbound::EventSink;
use std::sync::Mutex;
use tracing::info;

/// Sink that forwards every notification to the tracing subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: GovernanceEvent) {
        info!(topic = event.topic(), id = event.proposal_id(), ?event, "governance event");
    }
}

/// Sink that records notifications for inspection in tests.
#[derive(Default)]
pub struct RecordingEventSink {
    events: Mutex<Vec<GovernanceEvent>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notifications published so far, in order.
    pub fn events(&self) -> Vec<GovernanceEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }

    /// Drops recorded notifications.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }
}

impl EventSink for RecordingEventSink {
    fn publish(&self, event: GovernanceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
