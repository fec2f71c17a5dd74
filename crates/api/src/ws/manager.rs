use std::collections::{HashMap, HashSet};

use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Channel sender half for pushing messages to a WebSocket connection.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// Metadata for a single WebSocket connection.
pub struct WsConnection {
    /// Topic rooms this connection has joined.
    pub rooms: HashSet<String>,
    /// Channel sender for outbound messages to this connection.
    pub sender: WsSender,
}

/// Manages all active WebSocket connections and their room memberships.
///
/// Thread-safe via interior `RwLock`; designed to be wrapped in `Arc` and
/// shared across the application.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}

impl WsManager {
    /// Create a new, empty connection manager.
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new connection.
    ///
    /// Returns the receiver half of the message channel so the caller can
    /// forward messages to the WebSocket sink.
    pub async fn add(&self, conn_id: String) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            rooms: HashSet::new(),
            sender: tx,
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Remove a connection by its ID.
    pub async fn remove(&self, conn_id: &str) {
        self.connections.write().await.remove(conn_id);
    }

    /// Join a connection to a topic room. Unknown connections are ignored.
    pub async fn join_room(&self, conn_id: &str, room: &str) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.rooms.insert(room.to_string());
        }
    }

    /// Remove a connection from a topic room.
    pub async fn leave_room(&self, conn_id: &str, room: &str) {
        if let Some(conn) = self.connections.write().await.get_mut(conn_id) {
            conn.rooms.remove(room);
        }
    }

    /// Send a message to every connection that joined `room`.
    ///
    /// Closed channels are skipped; the connection task cleans them up on
    /// its own exit.
    pub async fn broadcast_to_room(&self, room: &str, message: Message) {
        let connections = self.connections.read().await;
        for conn in connections.values() {
            if conn.rooms.contains(room) {
                let _ = conn.sender.send(message.clone());
            }
        }
    }

    /// Number of open connections.
    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn broadcast_reaches_only_room_members() {
        let manager = WsManager::new();
        let mut rx_a = manager.add("a".into()).await;
        let mut rx_b = manager.add("b".into()).await;

        manager.join_room("a", "waitlist").await;
        manager.join_room("b", "flush-display").await;

        manager
            .broadcast_to_room("waitlist", Message::Text("hello".into()))
            .await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn leaving_a_room_stops_delivery() {
        let manager = WsManager::new();
        let mut rx = manager.add("a".into()).await;

        manager.join_room("a", "admin").await;
        manager.leave_room("a", "admin").await;

        manager
            .broadcast_to_room("admin", Message::Text("hello".into()))
            .await;

        assert!(rx.try_recv().is_err());
    }
}
