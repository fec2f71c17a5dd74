//! Game catalog models and DTOs.

use pitboss_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `games` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Game {
    pub id: DbId,
    pub game_key: String,
    pub name: String,
    pub stakes: Option<String>,
    pub min_buyin: Option<i64>,
    pub max_buyin: Option<i64>,
    pub is_active: bool,
}

/// DTO for creating a game.
#[derive(Debug, Deserialize)]
pub struct CreateGame {
    pub game_key: String,
    pub name: String,
    pub stakes: Option<String>,
    pub min_buyin: Option<i64>,
    pub max_buyin: Option<i64>,
}

/// DTO for updating a game; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateGame {
    pub name: Option<String>,
    pub stakes: Option<String>,
    pub min_buyin: Option<i64>,
    pub max_buyin: Option<i64>,
    pub is_active: Option<bool>,
}
