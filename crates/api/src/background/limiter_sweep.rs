//! Periodic eviction of stale login-limiter state.
//!
//! The failure tracker only trims a source's window when that source
//! attempts another login, so this sweep bounds memory for sources that
//! never come back.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pitboss_core::rate_limit::AttemptTracker;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// How often stale limiter entries are evicted.
const SWEEP_INTERVAL: Duration = Duration::from_secs(600);

/// Run the limiter sweep loop until `cancel` is triggered.
pub async fn run(limiter: Arc<Mutex<AttemptTracker>>, cancel: CancellationToken) {
    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {
                limiter.lock().await.sweep(Utc::now());
            }
        }
    }
}
