//! Seat assignment models and DTOs.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `seats` table. Rows exist only while the seat is
/// occupied; vacating deletes the row.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Seat {
    pub id: DbId,
    pub table_id: DbId,
    pub table_number: i32,
    pub seat_number: i32,
    pub player_id: Option<DbId>,
    pub player_name: Option<String>,
    pub card_number: Option<String>,
    pub seated_at: Timestamp,
    pub seated_by: Option<DbId>,
}

/// DTO for assigning a seat.
#[derive(Debug, Deserialize)]
pub struct AssignSeat {
    pub player_id: Option<DbId>,
    pub player_name: Option<String>,
    pub card_number: Option<String>,
}
