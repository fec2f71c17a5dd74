//! Repository for the `waitlist_entries` table.
//!
//! Every operation that assigns or shifts positions runs inside a
//! transaction holding a per-game advisory lock, so position assignment is
//! serialized and the active queue stays gap-free with no duplicate
//! positions. Entries are never deleted; terminal statuses preserve the
//! audit history.

use pitboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::waitlist::{JoinWaitlist, WaitlistEntry};

/// Column list for `waitlist_entries` SELECT queries.
const COLUMNS: &str = "\
    id, player_id, player_name, phone, card_number, game_key, position, \
    num_players, planned_buyin, status, joined_at, called_at, called_by, \
    expires_at, seated_at, removed_at";

/// Take the per-game advisory lock for the current transaction.
///
/// All position mutations for one game serialize on this lock, which is
/// why the schema needs no (game, position) unique index that would break
/// the one-statement contiguity shift.
async fn lock_game(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    game_key: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1)::bigint)")
        .bind(game_key)
        .execute(&mut **tx)
        .await
        .map(|_| ())
}

/// Shift every active entry behind `position` down by one so the queue
/// stays contiguous. Must run under the game's advisory lock.
async fn shift_down_after(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    game_key: &str,
    position: i32,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "UPDATE waitlist_entries SET position = position - 1 \
         WHERE game_key = $1 AND status IN ('waiting', 'called') AND position > $2",
    )
    .bind(game_key)
    .bind(position)
    .execute(&mut **tx)
    .await
    .map(|_| ())
}

pub struct WaitlistRepo;

impl WaitlistRepo {
    /// All active entries across every game, ordered for grouped display.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waitlist_entries \
             WHERE status IN ('waiting', 'called') \
             ORDER BY game_key, position"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query).fetch_all(pool).await
    }

    /// Active entries for one game, in queue order.
    pub async fn list_active_by_game(
        pool: &PgPool,
        game_key: &str,
    ) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waitlist_entries \
             WHERE game_key = $1 AND status IN ('waiting', 'called') \
             ORDER BY position"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(game_key)
            .fetch_all(pool)
            .await
    }

    /// Active entries for a card number, across games.
    pub async fn list_active_by_card(
        pool: &PgPool,
        card_number: &str,
    ) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waitlist_entries \
             WHERE card_number = $1 AND status IN ('waiting', 'called') \
             ORDER BY game_key, position"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(card_number)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM waitlist_entries WHERE id = $1");
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Append a new entry at the tail of the game's queue.
    ///
    /// The position is `max(position) + 1` over active entries, read and
    /// written under the game's advisory lock so concurrent joins cannot
    /// observe the same tail.
    pub async fn join(
        pool: &PgPool,
        dto: &JoinWaitlist,
        player_id: Option<DbId>,
    ) -> Result<WaitlistEntry, sqlx::Error> {
        let mut tx = pool.begin().await?;
        lock_game(&mut tx, &dto.game_key).await?;

        let position: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(position), 0) + 1 FROM waitlist_entries \
             WHERE game_key = $1 AND status IN ('waiting', 'called')",
        )
        .bind(&dto.game_key)
        .fetch_one(&mut *tx)
        .await?;

        let query = format!(
            "INSERT INTO waitlist_entries \
             (player_id, player_name, phone, card_number, game_key, position, num_players, planned_buyin) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(player_id)
            .bind(&dto.player_name)
            .bind(&dto.phone)
            .bind(&dto.card_number)
            .bind(&dto.game_key)
            .bind(position)
            .bind(dto.num_players.unwrap_or(1))
            .bind(dto.planned_buyin.unwrap_or(300))
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(entry)
    }

    /// Transition `waiting` → `called`, arming the expiry timer.
    ///
    /// Returns `None` if the entry is no longer `waiting` (the status
    /// check is part of the UPDATE so a concurrent transition loses
    /// cleanly rather than double-arming the timer).
    pub async fn call(
        pool: &PgPool,
        id: DbId,
        called_by: DbId,
        now: Timestamp,
        expires_at: Timestamp,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE waitlist_entries \
             SET status = 'called', called_at = $2, called_by = $3, expires_at = $4 \
             WHERE id = $1 AND status = 'waiting' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .bind(now)
            .bind(called_by)
            .bind(expires_at)
            .fetch_optional(pool)
            .await
    }

    /// Transition an active entry to `seated` and close the gap it leaves:
    /// every remaining active entry behind it shifts down one position.
    pub async fn seat(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        Self::finish(pool, id, "seated", now).await
    }

    /// Transition an active entry to `removed`, with the same contiguity
    /// shift as seating (removal shortens the active queue identically).
    pub async fn remove(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        Self::finish(pool, id, "removed", now).await
    }

    /// Shared terminal transition: stamp the status, then renumber the
    /// remaining active entries behind the vacated position.
    async fn finish(
        pool: &PgPool,
        id: DbId,
        status: &'static str,
        now: Timestamp,
    ) -> Result<Option<WaitlistEntry>, sqlx::Error> {
        let game_key: Option<String> =
            sqlx::query_scalar("SELECT game_key FROM waitlist_entries WHERE id = $1")
                .bind(id)
                .fetch_optional(pool)
                .await?;
        let Some(game_key) = game_key else {
            return Ok(None);
        };

        let mut tx = pool.begin().await?;
        lock_game(&mut tx, &game_key).await?;

        let stamp_column = match status {
            "seated" => "seated_at",
            _ => "removed_at",
        };
        let query = format!(
            "UPDATE waitlist_entries SET status = $2, {stamp_column} = $3 \
             WHERE id = $1 AND status IN ('waiting', 'called') \
             RETURNING {COLUMNS}"
        );
        let entry = sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(id)
            .bind(status)
            .bind(now)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(entry) = entry else {
            tx.rollback().await?;
            return Ok(None);
        };

        shift_down_after(&mut tx, &entry.game_key, entry.position).await?;
        tx.commit().await?;
        Ok(Some(entry))
    }

    /// `called` entries whose grace period has lapsed at `now`.
    pub async fn find_expired(
        pool: &PgPool,
        now: Timestamp,
    ) -> Result<Vec<WaitlistEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM waitlist_entries \
             WHERE status = 'called' AND expires_at < $1 \
             ORDER BY game_key, position"
        );
        sqlx::query_as::<_, WaitlistEntry>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }
}
