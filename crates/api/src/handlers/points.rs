//! Handlers for the points leaderboard and manual awards.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pitboss_core::audit::action_kinds;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;
use pitboss_events::{topics, FloorEvent};
use serde::{Deserialize, Serialize};

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::points_transaction::{kinds, CreatePointsTransaction};
use pitboss_db::repositories::{ActivityLogRepo, PlayerRepo, PointsTransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Leaderboard depth.
const LEADERBOARD_LIMIT: i64 = 100;

/// Size of the qualifying cut for the monthly promotion.
const TOP_CUT: usize = 30;

#[derive(Debug, Deserialize)]
pub struct AwardPointsRequest {
    pub player_id: DbId,
    pub points: i64,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub id: DbId,
    pub card_number: String,
    pub name: String,
    pub points: i64,
}

// ---------------------------------------------------------------------------
// Leaderboard
// ---------------------------------------------------------------------------

/// GET /points/leaderboard
///
/// Ranks are recomputed from live balances on every read and written back
/// for display elsewhere; the balance set is authoritative, the stored
/// rank is not.
pub async fn leaderboard(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let players = PlayerRepo::leaderboard(&state.pool, LEADERBOARD_LIMIT).await?;

    let mut entries = Vec::with_capacity(players.len());
    for (i, player) in players.iter().enumerate() {
        let rank = i as i64 + 1;
        PlayerRepo::update_rank(&state.pool, player.id, rank).await?;
        entries.push(LeaderboardEntry {
            rank,
            id: player.id,
            card_number: player.card_number.clone(),
            name: player.name(),
            points: player.points_balance,
        });
    }

    let cutoff = entries.get(TOP_CUT - 1).map_or(0, |e| e.points);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "leaderboard": entries,
            "top30_cutoff": cutoff,
        }),
    }))
}

/// GET /points/top30 -- the qualifying cutoff for the monthly promotion.
pub async fn top30(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let players = PlayerRepo::leaderboard(&state.pool, TOP_CUT as i64).await?;
    let cutoff = players.get(TOP_CUT - 1).map_or(0, |p| p.points_balance);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "cutoff": cutoff,
            "count": players.len(),
        }),
    }))
}

// ---------------------------------------------------------------------------
// Manual award
// ---------------------------------------------------------------------------

/// POST /points/award -- staff bonus award.
pub async fn award(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(req): Json<AwardPointsRequest>,
) -> AppResult<impl IntoResponse> {
    let player = PlayerRepo::add_points(&state.pool, req.player_id, req.points)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Player", req.player_id)))?;
    let player_name = player.name();

    PointsTransactionRepo::insert(
        &state.pool,
        &CreatePointsTransaction {
            player_id: player.id,
            player_name: Some(player_name.clone()),
            points: req.points,
            kind: kinds::BONUS,
            description: Some(req.reason.clone()),
            awarded_by: Some(staff.id),
        },
    )
    .await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::POINTS,
            player_id: Some(player.id),
            player_name: Some(player_name),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some(format!("Awarded {} points ({})", req.points, req.reason)),
            ..Default::default()
        },
    )
    .await?;

    state
        .event_bus
        .publish(FloorEvent::new(topics::ADMIN, "points:updated"));

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": format!("Awarded {} points", req.points),
            "new_total": player.points_balance,
        }),
    }))
}
