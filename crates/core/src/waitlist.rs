//! Waitlist entry status machine.
//!
//! Entries are never physically deleted; terminal statuses mark them as
//! done so the audit history stays intact. Position renumbering itself is
//! executed by the repository layer inside a per-game lock; this module
//! owns the status vocabulary and the transition guards.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How long a called player has to claim their seat.
pub const CALL_EXPIRY_MINUTES: i64 = 30;

/// Lifecycle status of a waitlist entry.
///
/// `Seated` and `Removed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitlistStatus {
    Waiting,
    Called,
    Seated,
    Removed,
}

impl WaitlistStatus {
    /// Storage key for this status.
    pub fn as_str(self) -> &'static str {
        match self {
            WaitlistStatus::Waiting => "waiting",
            WaitlistStatus::Called => "called",
            WaitlistStatus::Seated => "seated",
            WaitlistStatus::Removed => "removed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "waiting" => Ok(WaitlistStatus::Waiting),
            "called" => Ok(WaitlistStatus::Called),
            "seated" => Ok(WaitlistStatus::Seated),
            "removed" => Ok(WaitlistStatus::Removed),
            other => Err(CoreError::Validation(format!(
                "Unknown waitlist status: {other}"
            ))),
        }
    }

    /// An active entry still occupies a position in its game's queue.
    pub fn is_active(self) -> bool {
        matches!(self, WaitlistStatus::Waiting | WaitlistStatus::Called)
    }

    pub fn is_terminal(self) -> bool {
        !self.is_active()
    }
}

/// A player may only be called from `waiting`; calling an already-called
/// entry would arm a second expiry timer.
pub fn validate_call(status: WaitlistStatus) -> Result<(), CoreError> {
    if status == WaitlistStatus::Waiting {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Cannot call entry in status '{}'",
            status.as_str()
        )))
    }
}

/// Seating is valid from `waiting` or `called`.
pub fn validate_seat(status: WaitlistStatus) -> Result<(), CoreError> {
    if status.is_active() {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Cannot seat entry in status '{}'",
            status.as_str()
        )))
    }
}

/// Any non-terminal entry may be removed.
pub fn validate_remove(status: WaitlistStatus) -> Result<(), CoreError> {
    if status.is_active() {
        Ok(())
    } else {
        Err(CoreError::InvalidState(format!(
            "Cannot remove entry in status '{}'",
            status.as_str()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_is_valid_only_from_waiting() {
        assert!(validate_call(WaitlistStatus::Waiting).is_ok());
        assert!(validate_call(WaitlistStatus::Called).is_err());
        assert!(validate_call(WaitlistStatus::Seated).is_err());
        assert!(validate_call(WaitlistStatus::Removed).is_err());
    }

    #[test]
    fn seat_is_valid_from_waiting_and_called() {
        assert!(validate_seat(WaitlistStatus::Waiting).is_ok());
        assert!(validate_seat(WaitlistStatus::Called).is_ok());
        assert!(validate_seat(WaitlistStatus::Seated).is_err());
        assert!(validate_seat(WaitlistStatus::Removed).is_err());
    }

    #[test]
    fn remove_is_valid_from_any_active_status() {
        assert!(validate_remove(WaitlistStatus::Waiting).is_ok());
        assert!(validate_remove(WaitlistStatus::Called).is_ok());
        assert!(validate_remove(WaitlistStatus::Seated).is_err());
        assert!(validate_remove(WaitlistStatus::Removed).is_err());
    }

    #[test]
    fn terminal_statuses_are_not_active() {
        assert!(WaitlistStatus::Waiting.is_active());
        assert!(WaitlistStatus::Called.is_active());
        assert!(WaitlistStatus::Seated.is_terminal());
        assert!(WaitlistStatus::Removed.is_terminal());
    }

    #[test]
    fn status_round_trips_through_storage_keys() {
        for status in [
            WaitlistStatus::Waiting,
            WaitlistStatus::Called,
            WaitlistStatus::Seated,
            WaitlistStatus::Removed,
        ] {
            assert_eq!(WaitlistStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(WaitlistStatus::parse("paged").is_err());
    }
}
