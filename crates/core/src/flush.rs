//! Flush jackpot session windows and badge tracking.
//!
//! Two fixed local-time windows define the promotional sessions: the
//! afternoon session spans [14:00, 20:00) of one calendar day, the
//! late-night session spans [20:00, 24:00) plus [00:00, 02:00) of the next
//! morning. A late-night badge awarded after midnight still belongs to the
//! session dated the evening it started. Session resolution is a pure
//! function over an injected wall-clock reading so the midnight boundary is
//! testable without a live clock.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Session windows
// ---------------------------------------------------------------------------

/// Local hour at which the afternoon session opens.
pub const AFTERNOON_START_HOUR: u32 = 14;

/// Local hour at which the afternoon session closes (exclusive) and the
/// late-night session opens.
pub const LATE_NIGHT_START_HOUR: u32 = 20;

/// Local hour at which the late-night session closes (exclusive), the
/// morning after it started.
pub const LATE_NIGHT_END_HOUR: u32 = 2;

/// The two promotional session types, named by their time window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlushSession {
    Afternoon,
    LateNight,
}

impl FlushSession {
    /// Storage key for this session type.
    pub fn as_str(self) -> &'static str {
        match self {
            FlushSession::Afternoon => "afternoon",
            FlushSession::LateNight => "late_night",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "afternoon" => Ok(FlushSession::Afternoon),
            "late_night" => Ok(FlushSession::LateNight),
            other => Err(CoreError::Validation(format!(
                "Unknown session type: {other}"
            ))),
        }
    }
}

/// Resolve the active session and its date key from a local wall-clock
/// reading.
///
/// Returns `None` between 02:00 and 14:00 when no session is active. For
/// the post-midnight tail of the late-night window the date key is the
/// previous calendar day -- the day the session started.
pub fn resolve_session(local: NaiveDateTime) -> Option<(FlushSession, NaiveDate)> {
    let hour = local.hour();
    if (AFTERNOON_START_HOUR..LATE_NIGHT_START_HOUR).contains(&hour) {
        Some((FlushSession::Afternoon, local.date()))
    } else if hour >= LATE_NIGHT_START_HOUR {
        Some((FlushSession::LateNight, local.date()))
    } else if hour < LATE_NIGHT_END_HOUR {
        Some((FlushSession::LateNight, local.date().pred_opt()?))
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Suits
// ---------------------------------------------------------------------------

/// One of the four suit badges collected toward session completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Spade,
    Heart,
    Diamond,
    Club,
}

/// All four suits, in display order.
pub const ALL_SUITS: [Suit; 4] = [Suit::Spade, Suit::Heart, Suit::Diamond, Suit::Club];

impl Suit {
    /// Storage key for this suit; doubles as the badge column name.
    pub fn as_str(self) -> &'static str {
        match self {
            Suit::Spade => "spade",
            Suit::Heart => "heart",
            Suit::Diamond => "diamond",
            Suit::Club => "club",
        }
    }

    /// Single-letter abbreviation used on the leaderboard display.
    pub fn letter(self) -> &'static str {
        match self {
            Suit::Spade => "S",
            Suit::Heart => "H",
            Suit::Diamond => "D",
            Suit::Club => "C",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spade => "\u{2660}",
            Suit::Heart => "\u{2665}",
            Suit::Diamond => "\u{2666}",
            Suit::Club => "\u{2663}",
        }
    }

    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "spade" => Ok(Suit::Spade),
            "heart" => Ok(Suit::Heart),
            "diamond" => Ok(Suit::Diamond),
            "club" => Ok(Suit::Club),
            other => Err(CoreError::Validation(format!("Unknown suit: {other}"))),
        }
    }
}

// ---------------------------------------------------------------------------
// Badge set
// ---------------------------------------------------------------------------

/// The four independent suit badges of one progress record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BadgeSet {
    pub spade: bool,
    pub heart: bool,
    pub diamond: bool,
    pub club: bool,
}

impl BadgeSet {
    /// Completion is exactly the conjunction of all four badges.
    pub fn is_complete(self) -> bool {
        self.spade && self.heart && self.diamond && self.club
    }

    pub fn has(self, suit: Suit) -> bool {
        match suit {
            Suit::Spade => self.spade,
            Suit::Heart => self.heart,
            Suit::Diamond => self.diamond,
            Suit::Club => self.club,
        }
    }

    /// Suits collected so far, in display order.
    pub fn collected(self) -> Vec<Suit> {
        ALL_SUITS.into_iter().filter(|s| self.has(*s)).collect()
    }

    pub fn count(self) -> usize {
        self.collected().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, 0)
            .unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    // -----------------------------------------------------------------------
    // Session resolution across the 24-hour boundary
    // -----------------------------------------------------------------------

    #[test]
    fn no_session_just_before_the_afternoon_opens() {
        assert_eq!(resolve_session(at(2026, 1, 15, 13, 59)), None);
    }

    #[test]
    fn afternoon_opens_at_two_pm() {
        assert_eq!(
            resolve_session(at(2026, 1, 15, 14, 0)),
            Some((FlushSession::Afternoon, date(2026, 1, 15)))
        );
    }

    #[test]
    fn afternoon_runs_until_eight_pm_exclusive() {
        assert_eq!(
            resolve_session(at(2026, 1, 15, 19, 59)),
            Some((FlushSession::Afternoon, date(2026, 1, 15)))
        );
    }

    #[test]
    fn late_night_opens_at_eight_pm() {
        assert_eq!(
            resolve_session(at(2026, 1, 15, 20, 0)),
            Some((FlushSession::LateNight, date(2026, 1, 15)))
        );
    }

    #[test]
    fn late_night_before_midnight_keeps_todays_date() {
        assert_eq!(
            resolve_session(at(2026, 1, 15, 23, 59)),
            Some((FlushSession::LateNight, date(2026, 1, 15)))
        );
    }

    #[test]
    fn late_night_after_midnight_belongs_to_the_previous_day() {
        assert_eq!(
            resolve_session(at(2026, 1, 16, 0, 30)),
            Some((FlushSession::LateNight, date(2026, 1, 15)))
        );
    }

    #[test]
    fn late_night_tail_crosses_a_month_boundary() {
        assert_eq!(
            resolve_session(at(2026, 2, 1, 1, 15)),
            Some((FlushSession::LateNight, date(2026, 1, 31)))
        );
    }

    #[test]
    fn late_night_closes_at_two_am() {
        assert_eq!(resolve_session(at(2026, 1, 16, 2, 0)), None);
    }

    #[test]
    fn no_session_mid_morning() {
        assert_eq!(resolve_session(at(2026, 1, 16, 9, 0)), None);
    }

    #[test]
    fn last_minute_of_the_late_night_tail() {
        assert_eq!(
            resolve_session(at(2026, 1, 16, 1, 59)),
            Some((FlushSession::LateNight, date(2026, 1, 15)))
        );
    }

    // -----------------------------------------------------------------------
    // Badge sets
    // -----------------------------------------------------------------------

    #[test]
    fn completion_requires_all_four_suits() {
        let mut badges = BadgeSet {
            spade: true,
            heart: true,
            diamond: true,
            club: false,
        };
        assert!(!badges.is_complete());
        badges.club = true;
        assert!(badges.is_complete());
    }

    #[test]
    fn collected_preserves_display_order() {
        let badges = BadgeSet {
            spade: false,
            heart: true,
            diamond: false,
            club: true,
        };
        assert_eq!(badges.collected(), vec![Suit::Heart, Suit::Club]);
        assert_eq!(badges.count(), 2);
    }

    #[test]
    fn suit_round_trips_through_storage_keys() {
        for suit in ALL_SUITS {
            assert_eq!(Suit::parse(suit.as_str()).unwrap(), suit);
        }
        assert!(Suit::parse("joker").is_err());
    }

    #[test]
    fn session_round_trips_through_storage_keys() {
        for session in [FlushSession::Afternoon, FlushSession::LateNight] {
            assert_eq!(FlushSession::parse(session.as_str()).unwrap(), session);
        }
    }
}
