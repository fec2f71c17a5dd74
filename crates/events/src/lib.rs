//! Pitboss event bus.
//!
//! In-process publish/subscribe hub used to fan floor-state changes out to
//! live-display clients. The core emits topic-scoped events and does not
//! know or care who is subscribed; delivery is best-effort and zero
//! subscribers is normal.

pub mod bus;

pub use bus::{topics, EventBus, FloorEvent};
