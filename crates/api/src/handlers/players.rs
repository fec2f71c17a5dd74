//! Handlers for player lookup and the check-in / check-out lifecycle.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pitboss_core::audit::action_kinds;
use pitboss_core::error::CoreError;
use pitboss_core::points::{points_for_cash_session, round_hours, CASH_DAILY_THRESHOLD_HOURS};
use pitboss_core::types::DbId;
use serde::Serialize;

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::checkin::CloseCheckin;
use pitboss_db::models::player::{PlayerSearch, PlayerSummary};
use pitboss_db::models::points_transaction::{kinds, CreatePointsTransaction};
use pitboss_db::repositories::{ActivityLogRepo, CheckinRepo, PlayerRepo, PointsTransactionRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Player listing cap.
const LIST_LIMIT: i64 = 100;

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub message: String,
    pub hours_played: f64,
    pub points_earned: i64,
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// GET /players?search=
pub async fn list_players(
    State(state): State<AppState>,
    Query(params): Query<PlayerSearch>,
) -> AppResult<impl IntoResponse> {
    let players = PlayerRepo::search(&state.pool, params.search.as_deref(), LIST_LIMIT).await?;
    let summaries: Vec<PlayerSummary> = players.iter().map(PlayerSummary::from).collect();
    Ok(Json(DataResponse { data: summaries }))
}

/// GET /players/{id}
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let player = PlayerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Player", id)))?;
    Ok(Json(DataResponse {
        data: PlayerSummary::from(&player),
    }))
}

/// GET /players/card/{card_number}
pub async fn get_player_by_card(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let player = PlayerRepo::find_by_card(&state.pool, &card_number)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Player", &card_number)))?;
    Ok(Json(DataResponse {
        data: PlayerSummary::from(&player),
    }))
}

// ---------------------------------------------------------------------------
// Check-in / check-out
// ---------------------------------------------------------------------------

/// POST /players/{id}/checkin
pub async fn checkin(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let player = PlayerRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Player", id)))?;

    let name = player.name();
    let checkin = CheckinRepo::create(&state.pool, player.id, &name, staff.id).await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::CHECK_IN,
            player_id: Some(player.id),
            player_name: Some(name),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some("Player checked in".into()),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Checked in successfully",
            "checkin_id": checkin.id,
        }),
    }))
}

/// POST /players/{id}/checkout
///
/// Closes the player's open session, computes elapsed fractional hours,
/// and awards points per the cash-session policy. The raw hours drive the
/// tier thresholds; the stored value is rounded to two decimals.
pub async fn checkout(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let checkin = CheckinRepo::find_open_by_player(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState("No active check-in found".into()))
        })?;

    let now = Utc::now();
    let hours = (now - checkin.checked_in_at).num_seconds() as f64 / 3600.0;
    let points = points_for_cash_session(hours);

    CheckinRepo::close(
        &state.pool,
        checkin.id,
        &CloseCheckin {
            checked_out_at: now,
            total_minutes: (hours * 60.0).round() as i32,
            hours_played: round_hours(hours),
            points_awarded: points,
            checked_out_by: staff.id,
        },
    )
    .await?;

    if points > 0 {
        PlayerRepo::add_points(&state.pool, id, points).await?;

        let kind = if hours >= CASH_DAILY_THRESHOLD_HOURS {
            kinds::CASH_DAILY
        } else {
            kinds::CASH_HOURLY
        };
        PointsTransactionRepo::insert(
            &state.pool,
            &CreatePointsTransaction {
                player_id: id,
                player_name: checkin.player_name.clone(),
                points,
                kind,
                description: Some(format!("{:.1} hours played", hours)),
                awarded_by: Some(staff.id),
            },
        )
        .await?;
    }

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::CHECK_OUT,
            player_id: Some(id),
            player_name: checkin.player_name.clone(),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some(format!(
                "Checked out after {:.1} hours, earned {points} points",
                hours
            )),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: CheckoutResponse {
            message: "Checked out successfully".into(),
            hours_played: round_hours(hours),
            points_earned: points,
        },
    }))
}
