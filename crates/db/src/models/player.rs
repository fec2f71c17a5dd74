//! Player entity models and DTOs.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `players` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Player {
    pub id: DbId,
    pub card_number: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub phone_last4: String,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub pin_hash: String,
    pub points_balance: i64,
    pub rank: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Player {
    /// Display name: first name plus last initial.
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_initial)
    }
}

/// DTO for creating a player. `pin_hash` is hashed before it gets here.
#[derive(Debug)]
pub struct CreatePlayer {
    pub card_number: String,
    pub first_name: String,
    pub last_initial: String,
    pub phone: String,
    pub phone_last4: String,
    pub email: Option<String>,
    pub pin_hash: String,
}

/// Public projection returned by the player routes.
#[derive(Debug, Serialize)]
pub struct PlayerSummary {
    pub id: DbId,
    pub card_number: String,
    pub name: String,
    pub phone: String,
    pub points: i64,
    pub rank: Option<i64>,
}

impl From<&Player> for PlayerSummary {
    fn from(p: &Player) -> Self {
        Self {
            id: p.id,
            card_number: p.card_number.clone(),
            name: p.name(),
            phone: p.phone.clone(),
            points: p.points_balance,
            rank: p.rank,
        }
    }
}

/// Query parameters for the player listing.
#[derive(Debug, Deserialize)]
pub struct PlayerSearch {
    pub search: Option<String>,
}
