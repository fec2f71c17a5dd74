//! Repository for the `seats` table.
//!
//! Seat uniqueness is enforced by `uq_seats_table_seat` at the storage
//! layer; of two concurrent assignments exactly one insert succeeds and
//! the loser surfaces as a unique violation, which the API layer maps to
//! `SeatOccupied`.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::seat::{AssignSeat, Seat};

/// Column list for `seats` SELECT queries.
const COLUMNS: &str = "\
    id, table_id, table_number, seat_number, player_id, player_name, \
    card_number, seated_at, seated_by";

pub struct SeatRepo;

impl SeatRepo {
    /// Create an assignment. A unique violation means the seat already has
    /// an active occupant.
    pub async fn assign(
        pool: &PgPool,
        table_id: DbId,
        table_number: i32,
        seat_number: i32,
        dto: &AssignSeat,
        seated_by: DbId,
    ) -> Result<Seat, sqlx::Error> {
        let query = format!(
            "INSERT INTO seats \
             (table_id, table_number, seat_number, player_id, player_name, card_number, seated_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(table_id)
            .bind(table_number)
            .bind(seat_number)
            .bind(dto.player_id)
            .bind(&dto.player_name)
            .bind(&dto.card_number)
            .bind(seated_by)
            .fetch_one(pool)
            .await
    }

    /// Delete the active assignment if present. Idempotent: vacating an
    /// empty seat returns `None` rather than an error.
    pub async fn vacate(
        pool: &PgPool,
        table_number: i32,
        seat_number: i32,
    ) -> Result<Option<Seat>, sqlx::Error> {
        let query = format!(
            "DELETE FROM seats WHERE table_number = $1 AND seat_number = $2 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Seat>(&query)
            .bind(table_number)
            .bind(seat_number)
            .fetch_optional(pool)
            .await
    }

    /// Active assignments for one table, in seat order.
    pub async fn list_by_table(
        pool: &PgPool,
        table_number: i32,
    ) -> Result<Vec<Seat>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM seats WHERE table_number = $1 ORDER BY seat_number");
        sqlx::query_as::<_, Seat>(&query)
            .bind(table_number)
            .fetch_all(pool)
            .await
    }

    /// Live occupancy count; `available_seats` is always derived from
    /// this, never cached.
    pub async fn count_by_table(pool: &PgPool, table_number: i32) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*)::BIGINT FROM seats WHERE table_number = $1")
            .bind(table_number)
            .fetch_one(pool)
            .await
    }

    /// Vacate every seat of a table (table close).
    pub async fn delete_by_table(pool: &PgPool, table_number: i32) -> Result<u64, sqlx::Error> {
        sqlx::query("DELETE FROM seats WHERE table_number = $1")
            .bind(table_number)
            .execute(pool)
            .await
            .map(|r| r.rows_affected())
    }
}
