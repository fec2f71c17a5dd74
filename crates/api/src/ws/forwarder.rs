//! Bridges the event bus onto WebSocket rooms.
//!
//! Subscribes to the [`EventBus`] and pushes every [`FloorEvent`] to the
//! connections that joined the event's topic room. Runs until the bus is
//! dropped.

use std::sync::Arc;

use axum::extract::ws::Message;
use pitboss_events::FloorEvent;
use tokio::sync::broadcast;

use super::WsManager;

pub async fn run(manager: Arc<WsManager>, mut events: broadcast::Receiver<FloorEvent>) {
    loop {
        match events.recv().await {
            Ok(event) => {
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!(error = %e, "Failed to serialize floor event");
                        continue;
                    }
                };
                manager
                    .broadcast_to_room(&event.topic, Message::Text(text.into()))
                    .await;
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "Event forwarder lagged behind the bus");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    tracing::info!("Event forwarder stopped");
}
