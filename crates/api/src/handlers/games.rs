//! Handlers for the game catalog. Mutations are admin-only.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;

use pitboss_db::models::game::{CreateGame, UpdateGame};
use pitboss_db::repositories::GameRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /games
pub async fn list_games(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let games = GameRepo::list_active(&state.pool).await?;
    Ok(Json(DataResponse { data: games }))
}

/// POST /games
pub async fn create_game(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(dto): Json<CreateGame>,
) -> AppResult<impl IntoResponse> {
    let game = GameRepo::create(&state.pool, &dto).await?;
    Ok(Json(DataResponse { data: game }))
}

/// PUT /games/{id}
pub async fn update_game(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(dto): Json<UpdateGame>,
) -> AppResult<impl IntoResponse> {
    let game = GameRepo::update(&state.pool, id, &dto)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Game", id)))?;
    Ok(Json(DataResponse { data: game }))
}

/// DELETE /games/{id} -- deactivate; games live on in history.
pub async fn delete_game(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !GameRepo::deactivate(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::not_found("Game", id)));
    }
    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Game deactivated" }),
    }))
}
