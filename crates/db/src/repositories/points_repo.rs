//! Repository for the `points_transactions` table.

use sqlx::PgPool;

use crate::models::points_transaction::{CreatePointsTransaction, PointsTransaction};

/// Column list for `points_transactions` SELECT queries.
const COLUMNS: &str = "\
    id, player_id, player_name, points, kind, description, awarded_by, created_at";

pub struct PointsTransactionRepo;

impl PointsTransactionRepo {
    pub async fn insert(
        pool: &PgPool,
        dto: &CreatePointsTransaction,
    ) -> Result<PointsTransaction, sqlx::Error> {
        let query = format!(
            "INSERT INTO points_transactions \
             (player_id, player_name, points, kind, description, awarded_by) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PointsTransaction>(&query)
            .bind(dto.player_id)
            .bind(&dto.player_name)
            .bind(dto.points)
            .bind(dto.kind)
            .bind(&dto.description)
            .bind(dto.awarded_by)
            .fetch_one(pool)
            .await
    }
}
