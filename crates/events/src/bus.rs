//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is the publish/subscribe hub for [`FloorEvent`]s. It is
//! designed to be shared via `Arc<EventBus>` across the application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// Topics
// ---------------------------------------------------------------------------

/// Topic names a live-display client may subscribe to.
pub mod topics {
    /// Waitlist queue displays.
    pub const WAITLIST: &str = "waitlist";
    /// Table map displays.
    pub const TABLES: &str = "tables";
    /// The flush promotion wall display.
    pub const FLUSH_DISPLAY: &str = "flush-display";
    /// Staff dashboards.
    pub const ADMIN: &str = "admin";
}

// ---------------------------------------------------------------------------
// FloorEvent
// ---------------------------------------------------------------------------

/// A state change on the casino floor.
///
/// Constructed via [`FloorEvent::new`] and optionally enriched with
/// [`with_payload`](FloorEvent::with_payload).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloorEvent {
    /// Topic the event is scoped to, e.g. [`topics::WAITLIST`].
    pub topic: String,

    /// Colon-separated event name, e.g. `"waitlist:updated"`.
    pub event: String,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    /// When the event was created (UTC).
    pub timestamp: DateTime<Utc>,
}

impl FloorEvent {
    pub fn new(topic: impl Into<String>, event: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            event: event.into(),
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    /// Set the JSON payload for the event.
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`FloorEvent`].
pub struct EventBus {
    sender: broadcast::Sender<FloorEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed messages are dropped
    /// and slow receivers observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    ///
    /// Zero subscribers is not an error; emission is best-effort and the
    /// event is silently dropped.
    pub fn publish(&self, event: FloorEvent) {
        let _ = self.sender.send(event);
    }

    /// Create a new subscription receiving every event published after
    /// this call.
    pub fn subscribe(&self) -> broadcast::Receiver<FloorEvent> {
        self.sender.subscribe()
    }

    /// Number of active subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let bus = EventBus::default();
        let mut rx = bus.subscribe();

        bus.publish(
            FloorEvent::new(topics::WAITLIST, "waitlist:updated")
                .with_payload(serde_json::json!({ "game_key": "nlh-1-3" })),
        );

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, "waitlist");
        assert_eq!(event.event, "waitlist:updated");
        assert_eq!(event.payload["game_key"], "nlh-1-3");
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_not_an_error() {
        let bus = EventBus::default();
        bus.publish(FloorEvent::new(topics::ADMIN, "points:updated"));
        assert_eq!(bus.subscriber_count(), 0);
    }
}
