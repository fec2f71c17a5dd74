//! Table entity models and DTOs.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::seat::Seat;

/// A row from the `casino_tables` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CasinoTable {
    pub id: DbId,
    pub table_number: i32,
    pub game_id: Option<DbId>,
    pub game_name: Option<String>,
    pub stakes: Option<String>,
    pub max_seats: i32,
    pub status: String,
    pub opened_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub opened_by: Option<DbId>,
}

/// DTO for opening a table.
#[derive(Debug, Deserialize)]
pub struct OpenTable {
    pub table_number: i32,
    pub game_key: String,
    pub capacity: Option<i32>,
}

/// A table enriched with its live seat assignments.
///
/// `available_seats` is always derived from the live assignment count,
/// never stored.
#[derive(Debug, Serialize)]
pub struct TableWithSeats {
    #[serde(flatten)]
    pub table: CasinoTable,
    pub seats: Vec<Seat>,
    pub occupied_count: i64,
    pub available_seats: i64,
}

impl TableWithSeats {
    pub fn new(table: CasinoTable, seats: Vec<Seat>) -> Self {
        let occupied_count = seats.len() as i64;
        let available_seats = i64::from(table.max_seats) - occupied_count;
        Self {
            table,
            seats,
            occupied_count,
            available_seats,
        }
    }
}
