//! Repository for the `casino_tables` table.

use pitboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::table::CasinoTable;

/// Column list for `casino_tables` SELECT queries.
const COLUMNS: &str = "\
    id, table_number, game_id, game_name, stakes, max_seats, status, \
    opened_at, closed_at, opened_by";

pub struct TableRepo;

impl TableRepo {
    /// All tables that are not closed.
    pub async fn list_open(pool: &PgPool) -> Result<Vec<CasinoTable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM casino_tables WHERE status <> 'closed' ORDER BY table_number"
        );
        sqlx::query_as::<_, CasinoTable>(&query).fetch_all(pool).await
    }

    pub async fn find_by_number(
        pool: &PgPool,
        table_number: i32,
    ) -> Result<Option<CasinoTable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM casino_tables WHERE table_number = $1");
        sqlx::query_as::<_, CasinoTable>(&query)
            .bind(table_number)
            .fetch_optional(pool)
            .await
    }

    /// Open a table. Table numbers are unique, so reopening reuses the
    /// existing row; a brand-new number inserts one.
    pub async fn open(
        pool: &PgPool,
        table_number: i32,
        game_id: Option<DbId>,
        game_name: &str,
        stakes: &str,
        max_seats: i32,
        opened_by: DbId,
        now: Timestamp,
    ) -> Result<CasinoTable, sqlx::Error> {
        let query = format!(
            "INSERT INTO casino_tables \
             (table_number, game_id, game_name, stakes, max_seats, status, opened_at, opened_by) \
             VALUES ($1, $2, $3, $4, $5, 'open', $6, $7) \
             ON CONFLICT (table_number) DO UPDATE SET \
                 game_id = EXCLUDED.game_id, \
                 game_name = EXCLUDED.game_name, \
                 stakes = EXCLUDED.stakes, \
                 max_seats = EXCLUDED.max_seats, \
                 status = 'open', \
                 opened_at = EXCLUDED.opened_at, \
                 closed_at = NULL, \
                 opened_by = EXCLUDED.opened_by \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CasinoTable>(&query)
            .bind(table_number)
            .bind(game_id)
            .bind(game_name)
            .bind(stakes)
            .bind(max_seats)
            .bind(now)
            .bind(opened_by)
            .fetch_one(pool)
            .await
    }

    /// Mark a table closed. Returns the closed row if it existed.
    pub async fn close(
        pool: &PgPool,
        table_number: i32,
        now: Timestamp,
    ) -> Result<Option<CasinoTable>, sqlx::Error> {
        let query = format!(
            "UPDATE casino_tables SET status = 'closed', closed_at = $2 \
             WHERE table_number = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CasinoTable>(&query)
            .bind(table_number)
            .bind(now)
            .fetch_optional(pool)
            .await
    }
}
