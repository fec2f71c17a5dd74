//! Handlers for tables and seat assignments.
//!
//! Seat uniqueness is enforced by the storage layer; the unique-violation
//! path surfaces to callers as `SeatOccupied`. Available seat counts are
//! always derived from the live assignment rows.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pitboss_core::audit::action_kinds;
use pitboss_core::error::CoreError;
use pitboss_events::{topics, FloorEvent};

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::seat::AssignSeat;
use pitboss_db::models::table::{OpenTable, TableWithSeats};
use pitboss_db::repositories::{ActivityLogRepo, GameRepo, SeatRepo, TableRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default seat capacity when opening a table without one.
const DEFAULT_MAX_SEATS: i32 = 9;

fn publish_table_updated(state: &AppState, table_number: i32) {
    state.event_bus.publish(
        FloorEvent::new(topics::TABLES, "table:updated")
            .with_payload(serde_json::json!({ "table_number": table_number })),
    );
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /tables -- open tables with their live seat maps.
pub async fn list_tables(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let tables = TableRepo::list_open(&state.pool).await?;

    let mut enriched = Vec::with_capacity(tables.len());
    for table in tables {
        let seats = SeatRepo::list_by_table(&state.pool, table.table_number).await?;
        enriched.push(TableWithSeats::new(table, seats));
    }

    Ok(Json(DataResponse { data: enriched }))
}

/// GET /tables/{table_number}
pub async fn get_table(
    State(state): State<AppState>,
    Path(table_number): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let table = TableRepo::find_by_number(&state.pool, table_number)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Table", table_number)))?;

    let seats = SeatRepo::list_by_table(&state.pool, table_number).await?;

    Ok(Json(DataResponse {
        data: TableWithSeats::new(table, seats),
    }))
}

// ---------------------------------------------------------------------------
// Open / close
// ---------------------------------------------------------------------------

/// POST /tables -- open a table for a game.
pub async fn open_table(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Json(req): Json<OpenTable>,
) -> AppResult<impl IntoResponse> {
    if let Some(existing) = TableRepo::find_by_number(&state.pool, req.table_number).await? {
        if existing.status == "open" {
            return Err(AppError::Core(CoreError::InvalidState(
                "Table already open".into(),
            )));
        }
    }

    let game = GameRepo::find_by_key(&state.pool, &req.game_key).await?;
    let (game_id, game_name, stakes) = match &game {
        Some(g) => (
            Some(g.id),
            g.name.as_str(),
            g.stakes.as_deref().unwrap_or("$1/$3"),
        ),
        None => (None, "Unknown", "$1/$3"),
    };

    let table = TableRepo::open(
        &state.pool,
        req.table_number,
        game_id,
        game_name,
        stakes,
        req.capacity.unwrap_or(DEFAULT_MAX_SEATS),
        staff.id,
        Utc::now(),
    )
    .await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::TABLE_OPEN,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: Some(table.table_number.to_string()),
            details: Some(format!(
                "Table {} opened for {}",
                table.table_number,
                table.game_name.as_deref().unwrap_or("Unknown")
            )),
            ..Default::default()
        },
    )
    .await?;

    publish_table_updated(&state, table.table_number);

    Ok(Json(DataResponse { data: table }))
}

/// DELETE /tables/{table_number} -- close a table and vacate its seats.
pub async fn close_table(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(table_number): Path<i32>,
) -> AppResult<impl IntoResponse> {
    let table = TableRepo::close(&state.pool, table_number, Utc::now())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Table", table_number)))?;

    SeatRepo::delete_by_table(&state.pool, table_number).await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::TABLE_CLOSE,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: Some(table_number.to_string()),
            details: Some(format!("Table {table_number} closed")),
            ..Default::default()
        },
    )
    .await?;

    publish_table_updated(&state, table.table_number);

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": format!("Table {table_number} closed") }),
    }))
}

// ---------------------------------------------------------------------------
// Seat assignment
// ---------------------------------------------------------------------------

/// POST /tables/{table_number}/seats/{seat_number} -- seat an occupant.
///
/// Of two concurrent requests for the same seat exactly one insert wins;
/// the loser's unique violation surfaces as `SeatOccupied`.
pub async fn assign_seat(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path((table_number, seat_number)): Path<(i32, i32)>,
    Json(dto): Json<AssignSeat>,
) -> AppResult<impl IntoResponse> {
    let table = TableRepo::find_by_number(&state.pool, table_number)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Table", table_number)))?;

    let seat = SeatRepo::assign(&state.pool, table.id, table_number, seat_number, &dto, staff.id)
        .await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::SEATED,
            player_id: dto.player_id,
            player_name: dto.player_name.clone(),
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: Some(table_number.to_string()),
            details: Some(format!("Seated at Seat {seat_number}")),
            ..Default::default()
        },
    )
    .await?;

    publish_table_updated(&state, table_number);

    Ok(Json(DataResponse { data: seat }))
}

/// DELETE /tables/{table_number}/seats/{seat_number} -- vacate a seat.
///
/// Idempotent: vacating an empty seat succeeds without an activity record.
pub async fn vacate_seat(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path((table_number, seat_number)): Path<(i32, i32)>,
) -> AppResult<impl IntoResponse> {
    let vacated = SeatRepo::vacate(&state.pool, table_number, seat_number).await?;

    if let Some(seat) = vacated {
        ActivityLogRepo::insert(
            &state.pool,
            &CreateActivityLog {
                action_kind: action_kinds::REMOVED,
                player_id: seat.player_id,
                player_name: seat.player_name.clone(),
                staff_id: Some(staff.id),
                staff_name: Some(staff.name),
                table_number: Some(table_number.to_string()),
                details: Some(format!("Removed from Seat {seat_number}")),
                ..Default::default()
            },
        )
        .await?;

        publish_table_updated(&state, table_number);
    }

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Player removed from seat" }),
    }))
}
