//! Handlers for tournaments and registrations.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, Utc};
use pitboss_core::audit::action_kinds;
use pitboss_core::card::generate_confirmation;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::tournament::{CreateTournament, RegisterForTournament};
use pitboss_db::repositories::{ActivityLogRepo, RegistrationRepo, TournamentRepo};

use crate::auth::jwt::KIND_PLAYER;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalPrincipal;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Prefix on registration confirmation codes.
const CONFIRMATION_PREFIX: &str = "SR";

/// GET /tournaments
pub async fn list_tournaments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tournaments = TournamentRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: tournaments }))
}

/// GET /tournaments/{id}
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let tournament = TournamentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tournament", id)))?;

    let registrations = RegistrationRepo::list_for_tournament(&state.pool, id).await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "tournament": tournament,
            "registrations": registrations,
        }),
    }))
}

/// POST /tournaments
pub async fn create_tournament(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(dto): Json<CreateTournament>,
) -> AppResult<impl IntoResponse> {
    let tournament = TournamentRepo::create(&state.pool, &dto).await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::TOURNAMENT_REGISTER,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some(format!("Created tournament: {}", tournament.name)),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse { data: tournament }))
}

/// POST /tournaments/{id}/register
///
/// One registration per phone number per tournament; the duplicate check
/// is backed by a unique constraint so a race cannot slip through.
pub async fn register(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
    Path(id): Path<DbId>,
    Json(dto): Json<RegisterForTournament>,
) -> AppResult<impl IntoResponse> {
    let tournament = TournamentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Tournament", id)))?;

    let player_id = principal.filter(|p| p.kind == KIND_PLAYER).map(|p| p.id);
    let confirmation = generate_confirmation(CONFIRMATION_PREFIX, Utc::now().year());

    let registration =
        match RegistrationRepo::register(&state.pool, id, &dto, player_id, &confirmation).await {
            Ok(registration) => registration,
            Err(sqlx::Error::Database(db_err)) if db_err.code().as_deref() == Some("23505") => {
                return Err(AppError::Core(CoreError::Conflict(
                    "Already registered for this tournament".into(),
                )));
            }
            Err(e) => return Err(e.into()),
        };

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::TOURNAMENT_REGISTER,
            player_id,
            player_name: Some(registration.player_name.clone()),
            details: Some(format!("Registered for {}", tournament.name)),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Registered successfully",
            "registration": registration,
        }),
    }))
}
