//! Repository for the `food_orders` table.

use pitboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::food_order::{statuses, CreateOrder, FoodOrder};

/// Column list for `food_orders` SELECT queries.
const COLUMNS: &str = "\
    id, order_number, player_id, player_name, card_number, table_number, \
    seat_number, items, status, created_at, started_at, completed_at, \
    cancelled_at, handled_by";

pub struct FoodOrderRepo;

impl FoodOrderRepo {
    /// List orders by status, or the open queue (pending + preparing)
    /// oldest first when no filter is given.
    pub async fn list(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<FoodOrder>, sqlx::Error> {
        match status {
            Some(status) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM food_orders WHERE status = $1 ORDER BY created_at"
                );
                sqlx::query_as::<_, FoodOrder>(&query)
                    .bind(status)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM food_orders \
                     WHERE status IN ($1, $2) ORDER BY created_at"
                );
                sqlx::query_as::<_, FoodOrder>(&query)
                    .bind(statuses::PENDING)
                    .bind(statuses::PREPARING)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Place an order. Order numbers are sequential display tags starting
    /// at #1001.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateOrder,
        player_id: Option<DbId>,
        items: serde_json::Value,
    ) -> Result<FoodOrder, sqlx::Error> {
        let query = format!(
            "INSERT INTO food_orders \
             (order_number, player_id, player_name, card_number, table_number, seat_number, items) \
             SELECT '#' || (1000 + COUNT(*) + 1), $1, $2, $3, $4, $5, $6 FROM food_orders \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FoodOrder>(&query)
            .bind(player_id)
            .bind(&dto.player_name)
            .bind(&dto.card_number)
            .bind(dto.table_number)
            .bind(dto.seat_number)
            .bind(items)
            .fetch_one(pool)
            .await
    }

    pub async fn start(
        pool: &PgPool,
        id: DbId,
        handled_by: DbId,
        now: Timestamp,
    ) -> Result<Option<FoodOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE food_orders SET status = $4, started_at = $2, handled_by = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FoodOrder>(&query)
            .bind(id)
            .bind(now)
            .bind(handled_by)
            .bind(statuses::PREPARING)
            .fetch_optional(pool)
            .await
    }

    pub async fn complete(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<FoodOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE food_orders SET status = $3, completed_at = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FoodOrder>(&query)
            .bind(id)
            .bind(now)
            .bind(statuses::DELIVERED)
            .fetch_optional(pool)
            .await
    }

    pub async fn cancel(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<FoodOrder>, sqlx::Error> {
        let query = format!(
            "UPDATE food_orders SET status = $3, cancelled_at = $2 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FoodOrder>(&query)
            .bind(id)
            .bind(now)
            .bind(statuses::CANCELLED)
            .fetch_optional(pool)
            .await
    }
}
