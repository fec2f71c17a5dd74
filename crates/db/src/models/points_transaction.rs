//! Points transaction models.

use pitboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Transaction kinds, matching the points engine's award paths.
pub mod kinds {
    pub const TOURNAMENT_PLAY: &str = "tournament_play";
    pub const TOURNAMENT_PLACE: &str = "tournament_place";
    pub const CASH_HOURLY: &str = "cash_hourly";
    pub const CASH_DAILY: &str = "cash_daily";
    pub const BONUS: &str = "bonus";
    pub const ADJUSTMENT: &str = "adjustment";
}

/// A row from the `points_transactions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PointsTransaction {
    pub id: DbId,
    pub player_id: DbId,
    pub player_name: Option<String>,
    pub points: i64,
    pub kind: String,
    pub description: Option<String>,
    pub awarded_by: Option<DbId>,
    pub created_at: Timestamp,
}

/// DTO for recording a transaction.
#[derive(Debug)]
pub struct CreatePointsTransaction {
    pub player_id: DbId,
    pub player_name: Option<String>,
    pub points: i64,
    pub kind: &'static str,
    pub description: Option<String>,
    pub awarded_by: Option<DbId>,
}
