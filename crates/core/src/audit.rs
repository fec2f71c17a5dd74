//! Activity log action kinds.
//!
//! Every state-changing operation appends exactly one activity record; the
//! constants here are the closed vocabulary of `action_kind` values.

use crate::flush::Suit;

pub mod action_kinds {
    pub const SEATED: &str = "seated";
    pub const CALLED: &str = "called";
    pub const REMOVED: &str = "removed";
    pub const CHECK_IN: &str = "check_in";
    pub const CHECK_OUT: &str = "check_out";
    pub const POINTS: &str = "points";
    pub const FLUSH_SPADE: &str = "flush_spade";
    pub const FLUSH_HEART: &str = "flush_heart";
    pub const FLUSH_DIAMOND: &str = "flush_diamond";
    pub const FLUSH_CLUB: &str = "flush_club";
    pub const FLUSH_WINNER: &str = "flush_winner";
    pub const FLUSH_RESET: &str = "flush_reset";
    pub const TABLE_OPEN: &str = "table_open";
    pub const TABLE_CLOSE: &str = "table_close";
    pub const TOURNAMENT_REGISTER: &str = "tournament_register";
    pub const WAITLIST_JOIN: &str = "waitlist_join";
    pub const ORDER_START: &str = "order_start";
    pub const ORDER_DONE: &str = "order_done";
    pub const PLAYER_LOGIN: &str = "player_login";
    pub const PLAYER_REGISTER: &str = "player_register";
    pub const STAFF_LOGIN: &str = "staff_login";
}

/// Action kind for awarding one suit badge.
pub fn flush_action_kind(suit: Suit) -> &'static str {
    match suit {
        Suit::Spade => action_kinds::FLUSH_SPADE,
        Suit::Heart => action_kinds::FLUSH_HEART,
        Suit::Diamond => action_kinds::FLUSH_DIAMOND,
        Suit::Club => action_kinds::FLUSH_CLUB,
    }
}
