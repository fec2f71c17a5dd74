//! Handlers for the waitlist ledger: join, call, seat, remove.
//!
//! Every state change publishes a `waitlist:updated` event for the queue
//! displays and appends one activity record.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Duration, Utc};
use pitboss_core::audit::action_kinds;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;
use pitboss_core::waitlist::{validate_call, validate_remove, validate_seat, CALL_EXPIRY_MINUTES};
use pitboss_events::{topics, FloorEvent};
use serde::Deserialize;

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::waitlist::{JoinWaitlist, WaitlistEntry};
use pitboss_db::repositories::{ActivityLogRepo, WaitlistRepo};

use crate::auth::jwt::KIND_PLAYER;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalPrincipal;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SeatRequest {
    pub table_number: i32,
    pub seat_number: i32,
}

fn publish_waitlist_updated(state: &AppState, game_key: &str) {
    state.event_bus.publish(
        FloorEvent::new(topics::WAITLIST, "waitlist:updated")
            .with_payload(serde_json::json!({ "game_key": game_key })),
    );
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /waitlist -- all active entries grouped by game.
pub async fn list_waitlists(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let entries = WaitlistRepo::list_active(&state.pool).await?;
    let total_count = entries.len();

    let mut by_game: BTreeMap<String, Vec<WaitlistEntry>> = BTreeMap::new();
    for entry in entries {
        by_game.entry(entry.game_key.clone()).or_default().push(entry);
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "waitlists": by_game,
            "total_count": total_count,
        }),
    }))
}

/// GET /waitlist/{game_key}
pub async fn list_for_game(
    State(state): State<AppState>,
    Path(game_key): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entries = WaitlistRepo::list_active_by_game(&state.pool, &game_key).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// GET /waitlist/player/{card_number}
pub async fn list_for_player(
    State(state): State<AppState>,
    Path(card_number): Path<String>,
) -> AppResult<impl IntoResponse> {
    let entries = WaitlistRepo::list_active_by_card(&state.pool, &card_number).await?;
    Ok(Json(DataResponse { data: entries }))
}

// ---------------------------------------------------------------------------
// Join
// ---------------------------------------------------------------------------

/// POST /waitlist -- join a game's queue at the tail.
///
/// Open to walk-ins; a logged-in player is linked to the entry.
pub async fn join(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
    Json(dto): Json<JoinWaitlist>,
) -> AppResult<impl IntoResponse> {
    let player_id = principal
        .filter(|p| p.kind == KIND_PLAYER)
        .map(|p| p.id);

    let entry = WaitlistRepo::join(&state.pool, &dto, player_id).await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::WAITLIST_JOIN,
            player_id,
            player_name: Some(entry.player_name.clone()),
            details: Some(format!("Joined waitlist for {}", entry.game_key)),
            ..Default::default()
        },
    )
    .await?;

    publish_waitlist_updated(&state, &entry.game_key);

    Ok(Json(DataResponse { data: entry }))
}

// ---------------------------------------------------------------------------
// Call
// ---------------------------------------------------------------------------

/// PUT /waitlist/{id}/call -- page a waiting player.
///
/// Arms a 30-minute expiry; the background sweep removes entries whose
/// grace period lapses.
pub async fn call(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = WaitlistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Waitlist entry", id)))?;
    validate_call(entry.status()?)?;

    let now = Utc::now();
    let expires_at = now + Duration::minutes(CALL_EXPIRY_MINUTES);

    let entry = WaitlistRepo::call(&state.pool, id, staff.id, now, expires_at)
        .await?
        .ok_or_else(|| {
            // Lost a race with another transition since the fetch above.
            AppError::Core(CoreError::InvalidState(
                "Entry is no longer waiting".into(),
            ))
        })?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::CALLED,
            player_id: entry.player_id,
            player_name: Some(entry.player_name.clone()),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some("Player called from waitlist".into()),
            ..Default::default()
        },
    )
    .await?;

    publish_waitlist_updated(&state, &entry.game_key);
    state.event_bus.publish(
        FloorEvent::new(topics::ADMIN, "player:called")
            .with_payload(serde_json::json!({ "entry_id": entry.id })),
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Player called",
            "expires_at": expires_at,
            "entry": entry,
        }),
    }))
}

// ---------------------------------------------------------------------------
// Seat
// ---------------------------------------------------------------------------

/// PUT /waitlist/{id}/seat -- seat a waiting or called player.
///
/// After the transition the remaining active entries behind the seated
/// position shift down one so the queue stays contiguous.
pub async fn seat(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
    Json(req): Json<SeatRequest>,
) -> AppResult<impl IntoResponse> {
    let entry = WaitlistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Waitlist entry", id)))?;
    validate_seat(entry.status()?)?;

    let entry = WaitlistRepo::seat(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState("Entry is no longer active".into()))
        })?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::SEATED,
            player_id: entry.player_id,
            player_name: Some(entry.player_name.clone()),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: Some(req.table_number.to_string()),
            details: Some(format!(
                "Seated at Table {}, Seat {}",
                req.table_number, req.seat_number
            )),
            ..Default::default()
        },
    )
    .await?;

    publish_waitlist_updated(&state, &entry.game_key);

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Player seated",
            "table": req.table_number,
            "seat": req.seat_number,
        }),
    }))
}

// ---------------------------------------------------------------------------
// Remove
// ---------------------------------------------------------------------------

/// DELETE /waitlist/{id} -- remove an active entry.
///
/// Removal shortens the queue exactly like seating does, so it performs
/// the same contiguity shift.
pub async fn remove(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let entry = WaitlistRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Waitlist entry", id)))?;
    validate_remove(entry.status()?)?;

    let entry = WaitlistRepo::remove(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::InvalidState("Entry is no longer active".into()))
        })?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::REMOVED,
            player_id: entry.player_id,
            player_name: Some(entry.player_name.clone()),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            details: Some("Removed from waitlist".into()),
            ..Default::default()
        },
    )
    .await?;

    publish_waitlist_updated(&state, &entry.game_key);

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Removed from waitlist" }),
    }))
}
