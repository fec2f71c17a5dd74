use std::sync::Arc;

use tokio::sync::Mutex;

use pitboss_core::rate_limit::AttemptTracker;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: pitboss_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (live-display clients).
    pub ws_manager: Arc<WsManager>,
    /// Event bus for publishing floor-state changes.
    pub event_bus: Arc<pitboss_events::EventBus>,
    /// Failed-login tracker keyed by client IP.
    pub login_limiter: Arc<Mutex<AttemptTracker>>,
}
