//! Handlers for food orders.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use pitboss_core::audit::action_kinds;
use pitboss_core::error::CoreError;
use pitboss_core::types::DbId;
use pitboss_events::{topics, FloorEvent};
use serde::Deserialize;

use pitboss_db::models::activity::CreateActivityLog;
use pitboss_db::models::food_order::CreateOrder;
use pitboss_db::repositories::{ActivityLogRepo, FoodOrderRepo};

use crate::auth::jwt::KIND_PLAYER;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::OptionalPrincipal;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub status: Option<String>,
}

/// GET /orders -- the open queue, or a status filter.
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<impl IntoResponse> {
    let orders = FoodOrderRepo::list(&state.pool, query.status.as_deref()).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// POST /orders -- place an order.
pub async fn create_order(
    State(state): State<AppState>,
    OptionalPrincipal(principal): OptionalPrincipal,
    Json(dto): Json<CreateOrder>,
) -> AppResult<impl IntoResponse> {
    let player_id = principal.filter(|p| p.kind == KIND_PLAYER).map(|p| p.id);

    let items = serde_json::to_value(&dto.items)
        .map_err(|e| AppError::BadRequest(format!("Invalid order items: {e}")))?;

    let order = FoodOrderRepo::create(&state.pool, &dto, player_id, items).await?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::ORDER_START,
            player_id,
            player_name: Some(order.player_name.clone()),
            table_number: order.table_number.map(|n| n.to_string()),
            details: Some("New order placed".into()),
            ..Default::default()
        },
    )
    .await?;

    state.event_bus.publish(
        FloorEvent::new(topics::ADMIN, "order:new")
            .with_payload(serde_json::json!({ "order_id": order.id })),
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({
            "message": "Order placed",
            "order": order,
        }),
    }))
}

/// PUT /orders/{id}/start -- kitchen picked it up.
pub async fn start_order(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = FoodOrderRepo::start(&state.pool, id, staff.id, Utc::now())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Order", id)))?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::ORDER_START,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: order.table_number.map(|n| n.to_string()),
            details: Some("Started preparing order".into()),
            ..Default::default()
        },
    )
    .await?;

    state.event_bus.publish(
        FloorEvent::new(topics::ADMIN, "order:updated")
            .with_payload(serde_json::json!({ "order_id": order.id })),
    );

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Order started" }),
    }))
}

/// PUT /orders/{id}/complete -- delivered to the table.
pub async fn complete_order(
    State(state): State<AppState>,
    RequireStaff(staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let order = FoodOrderRepo::complete(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Order", id)))?;

    ActivityLogRepo::insert(
        &state.pool,
        &CreateActivityLog {
            action_kind: action_kinds::ORDER_DONE,
            staff_id: Some(staff.id),
            staff_name: Some(staff.name),
            table_number: order.table_number.map(|n| n.to_string()),
            details: Some("Order delivered".into()),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Order completed" }),
    }))
}

/// DELETE /orders/{id} -- cancel.
pub async fn cancel_order(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    FoodOrderRepo::cancel(&state.pool, id, Utc::now())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Order", id)))?;

    Ok(Json(DataResponse {
        data: serde_json::json!({ "message": "Order cancelled" }),
    }))
}
