//! Repositories for the `flush_progress` and `flush_jackpots` tables.
//!
//! Badge awards race on the same (player, session, date) record, so each
//! suit is set by a single-column UPDATE rather than a read-modify-write,
//! and completion is claimed by a guarded UPDATE that at most one caller
//! can win.

use chrono::NaiveDate;
use pitboss_core::flush::{FlushSession, Suit};
use pitboss_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::flush::{FlushJackpot, FlushProgress};

/// Column list for `flush_progress` SELECT queries.
const PROGRESS_COLUMNS: &str = "\
    id, player_id, player_name, card_number, session_type, session_date, \
    spade, heart, diamond, club, completed_at, created_at, updated_at";

/// Column list for `flush_jackpots` SELECT queries.
const JACKPOT_COLUMNS: &str = "\
    id, session_type, name, hours, amount, base_amount, daily_increment, \
    last_won_date, last_winner";

// ---------------------------------------------------------------------------
// FlushProgressRepo
// ---------------------------------------------------------------------------

pub struct FlushProgressRepo;

impl FlushProgressRepo {
    /// Fetch the player's progress record for the session key, creating an
    /// empty one on first award. The upsert makes concurrent first awards
    /// converge on the same row.
    pub async fn find_or_create(
        pool: &PgPool,
        player_id: DbId,
        player_name: &str,
        card_number: &str,
        session: FlushSession,
        session_date: NaiveDate,
    ) -> Result<FlushProgress, sqlx::Error> {
        let query = format!(
            "INSERT INTO flush_progress (player_id, player_name, card_number, session_type, session_date) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (player_id, session_type, session_date) \
             DO UPDATE SET updated_at = now() \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, FlushProgress>(&query)
            .bind(player_id)
            .bind(player_name)
            .bind(card_number)
            .bind(session.as_str())
            .bind(session_date)
            .fetch_one(pool)
            .await
    }

    /// Set one suit badge true. Idempotent, and atomic per column so
    /// concurrent awards of different suits cannot lose an update.
    pub async fn award_suit(
        pool: &PgPool,
        id: DbId,
        suit: Suit,
    ) -> Result<FlushProgress, sqlx::Error> {
        // Column name comes from the Suit enum, not caller input.
        let column = suit.as_str();
        let query = format!(
            "UPDATE flush_progress SET {column} = TRUE, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, FlushProgress>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Claim completion: stamps `completed_at` only if all four badges are
    /// set and it is still unset. Returns `None` when another caller
    /// already claimed it (or badges are incomplete), so exactly one
    /// jackpot payout fires per completion.
    pub async fn mark_completed(
        pool: &PgPool,
        id: DbId,
        now: Timestamp,
    ) -> Result<Option<FlushProgress>, sqlx::Error> {
        let query = format!(
            "UPDATE flush_progress SET completed_at = $2, updated_at = now() \
             WHERE id = $1 AND completed_at IS NULL \
               AND spade AND heart AND diamond AND club \
             RETURNING {PROGRESS_COLUMNS}"
        );
        sqlx::query_as::<_, FlushProgress>(&query)
            .bind(id)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Progress records for one session key, best badge count first.
    pub async fn leaderboard(
        pool: &PgPool,
        session: FlushSession,
        session_date: NaiveDate,
    ) -> Result<Vec<FlushProgress>, sqlx::Error> {
        let query = format!(
            "SELECT {PROGRESS_COLUMNS} FROM flush_progress \
             WHERE session_type = $1 AND session_date = $2 \
             ORDER BY (spade::int + heart::int + diamond::int + club::int) DESC, updated_at"
        );
        sqlx::query_as::<_, FlushProgress>(&query)
            .bind(session.as_str())
            .bind(session_date)
            .fetch_all(pool)
            .await
    }

    /// Delete every incomplete record of one session type, all dates.
    /// Completed records persist for leaderboard history.
    pub async fn reset_incomplete(
        pool: &PgPool,
        session: FlushSession,
    ) -> Result<u64, sqlx::Error> {
        sqlx::query(
            "DELETE FROM flush_progress WHERE session_type = $1 AND completed_at IS NULL",
        )
        .bind(session.as_str())
        .execute(pool)
        .await
        .map(|r| r.rows_affected())
    }
}

// ---------------------------------------------------------------------------
// FlushJackpotRepo
// ---------------------------------------------------------------------------

pub struct FlushJackpotRepo;

impl FlushJackpotRepo {
    pub async fn list_all(pool: &PgPool) -> Result<Vec<FlushJackpot>, sqlx::Error> {
        let query = format!("SELECT {JACKPOT_COLUMNS} FROM flush_jackpots ORDER BY session_type");
        sqlx::query_as::<_, FlushJackpot>(&query).fetch_all(pool).await
    }

    pub async fn find_by_session(
        pool: &PgPool,
        session: FlushSession,
    ) -> Result<Option<FlushJackpot>, sqlx::Error> {
        let query = format!("SELECT {JACKPOT_COLUMNS} FROM flush_jackpots WHERE session_type = $1");
        sqlx::query_as::<_, FlushJackpot>(&query)
            .bind(session.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Reset the pool to its base amount after a win and record the
    /// winner. Returns the pool as it stood before the reset so the payout
    /// amount can be reported.
    pub async fn reset_to_base(
        pool: &PgPool,
        session: FlushSession,
        winner: DbId,
        now: Timestamp,
    ) -> Result<Option<FlushJackpot>, sqlx::Error> {
        let query = format!(
            "UPDATE flush_jackpots j SET amount = j.base_amount, last_won_date = $2, last_winner = $3 \
             FROM (SELECT id, amount AS prior_amount FROM flush_jackpots WHERE session_type = $1) prior \
             WHERE j.id = prior.id \
             RETURNING j.id, j.session_type, j.name, j.hours, prior.prior_amount AS amount, \
                       j.base_amount, j.daily_increment, j.last_won_date, j.last_winner"
        );
        sqlx::query_as::<_, FlushJackpot>(&query)
            .bind(session.as_str())
            .bind(now)
            .bind(winner)
            .fetch_optional(pool)
            .await
    }

    /// Add each pool's configured daily increment to its amount.
    pub async fn increment_daily(pool: &PgPool) -> Result<u64, sqlx::Error> {
        sqlx::query("UPDATE flush_jackpots SET amount = amount + daily_increment")
            .execute(pool)
            .await
            .map(|r| r.rows_affected())
    }
}
