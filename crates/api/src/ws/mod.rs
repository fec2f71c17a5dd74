//! WebSocket infrastructure for live-display clients.
//!
//! Clients connect to `/api/v1/ws`, join topic rooms (waitlist boards,
//! the flush wall, staff dashboards), and receive every [`FloorEvent`]
//! published to those topics.
//!
//! [`FloorEvent`]: pitboss_events::FloorEvent

pub mod forwarder;
pub mod handler;
pub mod manager;

pub use manager::WsManager;
