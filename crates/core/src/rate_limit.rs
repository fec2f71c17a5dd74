//! Sliding-window tracker for failed login attempts.
//!
//! After `max_failures` failures within `window`, a source is blocked for
//! `block_duration`. A successful attempt clears the source's history. The
//! clock is passed into every call so the window arithmetic is testable;
//! the API layer wraps one tracker in a mutex and keys it by client IP.
//! State is process-local and does not survive restarts -- acceptable for a
//! single-instance deployment, and [`sweep`](AttemptTracker::sweep) bounds
//! memory by evicting expired entries.

use std::collections::HashMap;

use chrono::Duration;

use crate::types::Timestamp;

/// Failures allowed within the window before a source is blocked.
pub const DEFAULT_MAX_FAILURES: usize = 5;

/// Length of the sliding failure window, in minutes.
pub const DEFAULT_WINDOW_MINUTES: i64 = 15;

/// How long a source stays blocked, in minutes.
pub const DEFAULT_BLOCK_MINUTES: i64 = 15;

/// Tracks failed attempts per source and blocks abusive ones.
pub struct AttemptTracker {
    window: Duration,
    max_failures: usize,
    block_duration: Duration,
    /// Failure timestamps per source, trimmed to the window on each record.
    failures: HashMap<String, Vec<Timestamp>>,
    /// Block expiry per source.
    blocked_until: HashMap<String, Timestamp>,
}

impl Default for AttemptTracker {
    fn default() -> Self {
        Self::new(
            Duration::minutes(DEFAULT_WINDOW_MINUTES),
            DEFAULT_MAX_FAILURES,
            Duration::minutes(DEFAULT_BLOCK_MINUTES),
        )
    }
}

impl AttemptTracker {
    pub fn new(window: Duration, max_failures: usize, block_duration: Duration) -> Self {
        Self {
            window,
            max_failures,
            block_duration,
            failures: HashMap::new(),
            blocked_until: HashMap::new(),
        }
    }

    /// Whether `source` is currently blocked. Expired blocks are evicted.
    pub fn is_blocked(&mut self, source: &str, now: Timestamp) -> bool {
        match self.blocked_until.get(source) {
            Some(until) if now < *until => true,
            Some(_) => {
                self.blocked_until.remove(source);
                false
            }
            None => false,
        }
    }

    /// Record a failed attempt. Returns `true` if this failure tripped the
    /// block threshold.
    pub fn record_failure(&mut self, source: &str, now: Timestamp) -> bool {
        let cutoff = now - self.window;
        let attempts = self.failures.entry(source.to_string()).or_default();
        attempts.retain(|t| *t > cutoff);
        attempts.push(now);

        if attempts.len() >= self.max_failures {
            self.blocked_until
                .insert(source.to_string(), now + self.block_duration);
            true
        } else {
            false
        }
    }

    /// A successful attempt clears the source's failure history.
    pub fn record_success(&mut self, source: &str) {
        self.failures.remove(source);
    }

    /// Evict sources whose failures have all aged out and whose blocks have
    /// expired. Called periodically so the maps stay bounded.
    pub fn sweep(&mut self, now: Timestamp) {
        let cutoff = now - self.window;
        self.failures.retain(|_, attempts| {
            attempts.retain(|t| *t > cutoff);
            !attempts.is_empty()
        });
        self.blocked_until.retain(|_, until| now < *until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn t(minutes: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    #[test]
    fn blocks_after_max_failures_within_window() {
        let mut tracker = AttemptTracker::default();
        for i in 0..4 {
            assert!(!tracker.record_failure("1.2.3.4", t(i)));
        }
        assert!(tracker.record_failure("1.2.3.4", t(4)));
        assert!(tracker.is_blocked("1.2.3.4", t(5)));
    }

    #[test]
    fn block_expires_after_block_duration() {
        let mut tracker = AttemptTracker::default();
        for i in 0..5 {
            tracker.record_failure("1.2.3.4", t(i));
        }
        assert!(tracker.is_blocked("1.2.3.4", t(18)));
        assert!(!tracker.is_blocked("1.2.3.4", t(20)));
    }

    #[test]
    fn old_failures_fall_out_of_the_window() {
        let mut tracker = AttemptTracker::default();
        for i in 0..4 {
            tracker.record_failure("1.2.3.4", t(i));
        }
        // 16+ minutes later the first four have aged out.
        assert!(!tracker.record_failure("1.2.3.4", t(20)));
        assert!(!tracker.is_blocked("1.2.3.4", t(20)));
    }

    #[test]
    fn success_clears_failure_history() {
        let mut tracker = AttemptTracker::default();
        for i in 0..4 {
            tracker.record_failure("1.2.3.4", t(i));
        }
        tracker.record_success("1.2.3.4");
        assert!(!tracker.record_failure("1.2.3.4", t(5)));
    }

    #[test]
    fn sources_are_tracked_independently() {
        let mut tracker = AttemptTracker::default();
        for i in 0..5 {
            tracker.record_failure("1.2.3.4", t(i));
        }
        assert!(tracker.is_blocked("1.2.3.4", t(5)));
        assert!(!tracker.is_blocked("5.6.7.8", t(5)));
    }

    #[test]
    fn sweep_evicts_stale_state() {
        let mut tracker = AttemptTracker::default();
        tracker.record_failure("1.2.3.4", t(0));
        for i in 0..5 {
            tracker.record_failure("5.6.7.8", t(i));
        }
        tracker.sweep(t(60));
        assert!(tracker.failures.is_empty());
        assert!(tracker.blocked_until.is_empty());
    }
}
