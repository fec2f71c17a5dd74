//! Background tasks and scheduled jobs.
//!
//! Each submodule provides a long-running async function intended to be
//! spawned via `tokio::spawn`. All tasks accept a [`CancellationToken`]
//! for graceful shutdown, log per-run errors without crashing, and run
//! their work sequentially inside one loop so runs never overlap.
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod daily_jobs;
pub mod limiter_sweep;
pub mod waitlist_expiry;
