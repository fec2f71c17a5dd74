//! Repositories for the `tournaments` and `tournament_registrations`
//! tables.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::tournament::{
    CreateTournament, RegisterForTournament, Tournament, TournamentRegistration,
};

/// Column list for `tournaments` SELECT queries.
const COLUMNS: &str = "\
    id, name, date, time, buyin_amount, rebuy_amount, addon_amount, \
    guarantee, description, registered_count, is_active, created_at";

/// Column list for `tournament_registrations` SELECT queries.
const REGISTRATION_COLUMNS: &str = "\
    id, tournament_id, player_id, player_name, phone, email, card_number, \
    confirmation, registered_at, registered_by, status, finish_position";

// ---------------------------------------------------------------------------
// TournamentRepo
// ---------------------------------------------------------------------------

pub struct TournamentRepo;

impl TournamentRepo {
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Tournament>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tournaments WHERE is_active ORDER BY id");
        sqlx::query_as::<_, Tournament>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Tournament>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tournaments WHERE id = $1");
        sqlx::query_as::<_, Tournament>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, dto: &CreateTournament) -> Result<Tournament, sqlx::Error> {
        let query = format!(
            "INSERT INTO tournaments (name, date, time, buyin_amount, rebuy_amount, addon_amount, guarantee) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tournament>(&query)
            .bind(&dto.name)
            .bind(&dto.date)
            .bind(&dto.time)
            .bind(&dto.buyin)
            .bind(&dto.rebuy)
            .bind(&dto.addon)
            .bind(&dto.guarantee)
            .fetch_one(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// RegistrationRepo
// ---------------------------------------------------------------------------

pub struct RegistrationRepo;

impl RegistrationRepo {
    pub async fn list_for_tournament(
        pool: &PgPool,
        tournament_id: DbId,
    ) -> Result<Vec<TournamentRegistration>, sqlx::Error> {
        let query = format!(
            "SELECT {REGISTRATION_COLUMNS} FROM tournament_registrations \
             WHERE tournament_id = $1 ORDER BY registered_at"
        );
        sqlx::query_as::<_, TournamentRegistration>(&query)
            .bind(tournament_id)
            .fetch_all(pool)
            .await
    }

    /// Register a player and bump the tournament's registration counter in
    /// one transaction. A duplicate phone for the same tournament violates
    /// `uq_tournament_registrations_phone` and surfaces as a conflict.
    pub async fn register(
        pool: &PgPool,
        tournament_id: DbId,
        dto: &RegisterForTournament,
        player_id: Option<DbId>,
        confirmation: &str,
    ) -> Result<TournamentRegistration, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO tournament_registrations \
             (tournament_id, player_id, player_name, phone, email, card_number, confirmation) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {REGISTRATION_COLUMNS}"
        );
        let registration = sqlx::query_as::<_, TournamentRegistration>(&query)
            .bind(tournament_id)
            .bind(player_id)
            .bind(&dto.player_name)
            .bind(&dto.phone)
            .bind(&dto.email)
            .bind(&dto.card_number)
            .bind(confirmation)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query("UPDATE tournaments SET registered_count = registered_count + 1 WHERE id = $1")
            .bind(tournament_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(registration)
    }
}
