//! Player check-in session models.

use pitboss_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `player_checkins` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlayerCheckin {
    pub id: DbId,
    pub player_id: DbId,
    pub player_name: Option<String>,
    pub table_id: Option<DbId>,
    pub checked_in_at: Timestamp,
    pub checked_out_at: Option<Timestamp>,
    pub total_minutes: Option<i32>,
    pub hours_played: Option<f64>,
    pub points_awarded: Option<i64>,
    pub checked_in_by: Option<DbId>,
    pub checked_out_by: Option<DbId>,
}

/// Fields written when a session is closed out.
#[derive(Debug)]
pub struct CloseCheckin {
    pub checked_out_at: Timestamp,
    pub total_minutes: i32,
    pub hours_played: f64,
    pub points_awarded: i64,
    pub checked_out_by: DbId,
}
