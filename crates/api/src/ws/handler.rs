//! WebSocket upgrade handler and per-connection task.

use axum::extract::ws::{Message, WebSocket};
use axum::extract::{State, WebSocketUpgrade};
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

/// A room join/leave request from a display client.
#[derive(Debug, Deserialize)]
struct RoomRequest {
    action: String,
    room: String,
}

/// GET /ws -- upgrade to a WebSocket connection.
pub async fn ws_handler(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Drive one connection: forward outbound messages from the manager's
/// channel, and apply inbound join/leave requests until the client hangs
/// up.
async fn handle_socket(socket: WebSocket, state: AppState) {
    let conn_id = Uuid::new_v4().to_string();
    let mut outbound = state.ws_manager.add(conn_id.clone()).await;
    tracing::debug!(conn_id = %conn_id, "WebSocket connected");

    let (mut sink, mut stream) = socket.split();

    let send_task = tokio::spawn(async move {
        while let Some(message) = outbound.recv().await {
            if sink.send(message).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(message)) = stream.next().await {
        match message {
            Message::Text(text) => {
                let Ok(request) = serde_json::from_str::<RoomRequest>(&text) else {
                    tracing::debug!(conn_id = %conn_id, "Ignoring malformed room request");
                    continue;
                };
                match request.action.as_str() {
                    "join" => state.ws_manager.join_room(&conn_id, &request.room).await,
                    "leave" => state.ws_manager.leave_room(&conn_id, &request.room).await,
                    other => {
                        tracing::debug!(conn_id = %conn_id, action = other, "Unknown ws action");
                    }
                }
            }
            Message::Close(_) => break,
            // Pings are answered by axum automatically.
            _ => {}
        }
    }

    state.ws_manager.remove(&conn_id).await;
    send_task.abort();
    tracing::debug!(conn_id = %conn_id, "WebSocket disconnected");
}
