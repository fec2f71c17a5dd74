//! Repository for the `players` table.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::player::{CreatePlayer, Player};

/// Column list for `players` SELECT queries.
const COLUMNS: &str = "\
    id, card_number, first_name, last_initial, phone, phone_last4, email, \
    pin_hash, points_balance, rank, created_at, updated_at";

pub struct PlayerRepo;

impl PlayerRepo {
    /// List players, optionally filtered by name prefix or card number.
    pub async fn search(
        pool: &PgPool,
        search: Option<&str>,
        limit: i64,
    ) -> Result<Vec<Player>, sqlx::Error> {
        match search {
            Some(term) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM players \
                     WHERE first_name ILIKE $1 OR card_number LIKE $2 \
                     ORDER BY first_name LIMIT $3"
                );
                sqlx::query_as::<_, Player>(&query)
                    .bind(format!("%{term}%"))
                    .bind(format!("{term}%"))
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!("SELECT {COLUMNS} FROM players ORDER BY first_name LIMIT $1");
                sqlx::query_as::<_, Player>(&query)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE id = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_card(
        pool: &PgPool,
        card_number: &str,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE card_number = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(card_number)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_phone(pool: &PgPool, phone: &str) -> Result<Option<Player>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM players WHERE phone = $1");
        sqlx::query_as::<_, Player>(&query)
            .bind(phone)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreatePlayer) -> Result<Player, sqlx::Error> {
        let query = format!(
            "INSERT INTO players \
             (card_number, first_name, last_initial, phone, phone_last4, email, pin_hash) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(&dto.card_number)
            .bind(&dto.first_name)
            .bind(&dto.last_initial)
            .bind(&dto.phone)
            .bind(&dto.phone_last4)
            .bind(&dto.email)
            .bind(&dto.pin_hash)
            .fetch_one(pool)
            .await
    }

    /// Atomically add points to the player's balance.
    pub async fn add_points(
        pool: &PgPool,
        id: DbId,
        points: i64,
    ) -> Result<Option<Player>, sqlx::Error> {
        let query = format!(
            "UPDATE players SET points_balance = points_balance + $2, updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(id)
            .bind(points)
            .fetch_optional(pool)
            .await
    }

    /// Top point earners, highest first.
    pub async fn leaderboard(pool: &PgPool, limit: i64) -> Result<Vec<Player>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM players WHERE points_balance > 0 \
             ORDER BY points_balance DESC LIMIT $1"
        );
        sqlx::query_as::<_, Player>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Persist a leaderboard rank.
    pub async fn update_rank(pool: &PgPool, id: DbId, rank: i64) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE players SET rank = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(rank)
            .execute(pool)
            .await
            .map(|_| ())
    }
}
