//! Tournament and registration models.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tournaments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tournament {
    pub id: DbId,
    pub name: String,
    pub date: String,
    pub time: String,
    pub buyin_amount: Option<String>,
    pub rebuy_amount: Option<String>,
    pub addon_amount: Option<String>,
    pub guarantee: Option<String>,
    pub description: Option<String>,
    pub registered_count: i64,
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a tournament.
#[derive(Debug, Deserialize)]
pub struct CreateTournament {
    pub name: String,
    pub date: String,
    pub time: String,
    pub buyin: Option<String>,
    pub rebuy: Option<String>,
    pub addon: Option<String>,
    pub guarantee: Option<String>,
}

/// A row from the `tournament_registrations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TournamentRegistration {
    pub id: DbId,
    pub tournament_id: DbId,
    pub player_id: Option<DbId>,
    pub player_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub card_number: Option<String>,
    pub confirmation: String,
    pub registered_at: Timestamp,
    pub registered_by: Option<DbId>,
    pub status: String,
    pub finish_position: Option<i32>,
}

/// DTO for registering a player.
#[derive(Debug, Deserialize)]
pub struct RegisterForTournament {
    pub player_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub card_number: Option<String>,
}
