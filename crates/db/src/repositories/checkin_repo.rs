//! Repository for the `player_checkins` table.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::checkin::{CloseCheckin, PlayerCheckin};

/// Column list for `player_checkins` SELECT queries.
const COLUMNS: &str = "\
    id, player_id, player_name, table_id, checked_in_at, checked_out_at, \
    total_minutes, hours_played, points_awarded, checked_in_by, checked_out_by";

pub struct CheckinRepo;

impl CheckinRepo {
    pub async fn create(
        pool: &PgPool,
        player_id: DbId,
        player_name: &str,
        checked_in_by: DbId,
    ) -> Result<PlayerCheckin, sqlx::Error> {
        let query = format!(
            "INSERT INTO player_checkins (player_id, player_name, checked_in_by) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerCheckin>(&query)
            .bind(player_id)
            .bind(player_name)
            .bind(checked_in_by)
            .fetch_one(pool)
            .await
    }

    /// The player's most recent open session, if any.
    pub async fn find_open_by_player(
        pool: &PgPool,
        player_id: DbId,
    ) -> Result<Option<PlayerCheckin>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM player_checkins \
             WHERE player_id = $1 AND checked_out_at IS NULL \
             ORDER BY checked_in_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, PlayerCheckin>(&query)
            .bind(player_id)
            .fetch_optional(pool)
            .await
    }

    /// Close out a session with its computed duration and award.
    pub async fn close(
        pool: &PgPool,
        id: DbId,
        dto: &CloseCheckin,
    ) -> Result<PlayerCheckin, sqlx::Error> {
        let query = format!(
            "UPDATE player_checkins SET \
                 checked_out_at = $2, total_minutes = $3, hours_played = $4, \
                 points_awarded = $5, checked_out_by = $6 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PlayerCheckin>(&query)
            .bind(id)
            .bind(dto.checked_out_at)
            .bind(dto.total_minutes)
            .bind(dto.hours_played)
            .bind(dto.points_awarded)
            .bind(dto.checked_out_by)
            .fetch_one(pool)
            .await
    }
}
