//! Request handlers, one module per resource.

pub mod activity;
pub mod auth;
pub mod flush;
pub mod games;
pub mod orders;
pub mod players;
pub mod points;
pub mod tables;
pub mod tournaments;
pub mod waitlist;
