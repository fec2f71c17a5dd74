//! Flush progress and jackpot pool models.

use chrono::NaiveDate;
use pitboss_core::flush::BadgeSet;
use pitboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `flush_progress` table: one player's badges for one
/// (session type, session date) key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlushProgress {
    pub id: DbId,
    pub player_id: DbId,
    pub player_name: Option<String>,
    pub card_number: Option<String>,
    pub session_type: String,
    pub session_date: NaiveDate,
    pub spade: bool,
    pub heart: bool,
    pub diamond: bool,
    pub club: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FlushProgress {
    pub fn badges(&self) -> BadgeSet {
        BadgeSet {
            spade: self.spade,
            heart: self.heart,
            diamond: self.diamond,
            club: self.club,
        }
    }
}

/// A row from the `flush_jackpots` table. Exactly one per session type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FlushJackpot {
    pub id: DbId,
    pub session_type: String,
    pub name: String,
    pub hours: String,
    pub amount: i64,
    pub base_amount: i64,
    pub daily_increment: i64,
    pub last_won_date: Option<Timestamp>,
    pub last_winner: Option<DbId>,
}
