//! Waitlist entry models and DTOs.

use pitboss_core::types::{DbId, Timestamp};
use pitboss_core::waitlist::WaitlistStatus;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `waitlist_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WaitlistEntry {
    pub id: DbId,
    pub player_id: Option<DbId>,
    pub player_name: String,
    pub phone: String,
    pub card_number: Option<String>,
    pub game_key: String,
    pub position: i32,
    pub num_players: i32,
    pub planned_buyin: i64,
    pub status: String,
    pub joined_at: Timestamp,
    pub called_at: Option<Timestamp>,
    pub called_by: Option<DbId>,
    pub expires_at: Option<Timestamp>,
    pub seated_at: Option<Timestamp>,
    pub removed_at: Option<Timestamp>,
}

impl WaitlistEntry {
    /// Typed view of the stored status string.
    pub fn status(&self) -> Result<WaitlistStatus, pitboss_core::error::CoreError> {
        WaitlistStatus::parse(&self.status)
    }
}

/// DTO for joining a waitlist. The player reference is nullable so
/// walk-ins can join by name and phone alone.
#[derive(Debug, Deserialize)]
pub struct JoinWaitlist {
    pub player_name: String,
    pub phone: String,
    pub card_number: Option<String>,
    pub game_key: String,
    pub num_players: Option<i32>,
    pub planned_buyin: Option<i64>,
}
