//! Repository for the `games` table.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::game::{CreateGame, Game, UpdateGame};

/// Column list for `games` SELECT queries.
const COLUMNS: &str = "id, game_key, name, stakes, min_buyin, max_buyin, is_active";

pub struct GameRepo;

impl GameRepo {
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE is_active ORDER BY game_key");
        sqlx::query_as::<_, Game>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE id = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_key(pool: &PgPool, game_key: &str) -> Result<Option<Game>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM games WHERE game_key = $1");
        sqlx::query_as::<_, Game>(&query)
            .bind(game_key)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateGame) -> Result<Game, sqlx::Error> {
        let query = format!(
            "INSERT INTO games (game_key, name, stakes, min_buyin, max_buyin) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(&dto.game_key)
            .bind(&dto.name)
            .bind(&dto.stakes)
            .bind(dto.min_buyin)
            .bind(dto.max_buyin)
            .fetch_one(pool)
            .await
    }

    /// Update a game; absent fields are left unchanged.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateGame,
    ) -> Result<Option<Game>, sqlx::Error> {
        let query = format!(
            "UPDATE games SET \
                 name = COALESCE($2, name), \
                 stakes = COALESCE($3, stakes), \
                 min_buyin = COALESCE($4, min_buyin), \
                 max_buyin = COALESCE($5, max_buyin), \
                 is_active = COALESCE($6, is_active) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Game>(&query)
            .bind(id)
            .bind(&dto.name)
            .bind(&dto.stakes)
            .bind(dto.min_buyin)
            .bind(dto.max_buyin)
            .bind(dto.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Soft delete: games referenced by history are deactivated, never
    /// dropped.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query("UPDATE games SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map(|r| r.rows_affected() > 0)
    }
}
