//! Handlers for the activity audit feed. Staff only.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;

use pitboss_db::models::activity::ActivityQuery;
use pitboss_db::repositories::ActivityLogRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireStaff;
use crate::response::DataResponse;
use crate::state::AppState;

/// Default feed depth.
const DEFAULT_LIMIT: i64 = 50;

/// Export depth.
const EXPORT_LIMIT: i64 = 500;

/// GET /activity?limit=&action_kind=&staff=
///
/// `"all"` filter values mean no filter, matching the dashboard's
/// dropdown defaults.
pub async fn list_activity(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
    Query(params): Query<ActivityQuery>,
) -> AppResult<impl IntoResponse> {
    let action_kind = params
        .action_kind
        .as_deref()
        .filter(|v| *v != "all");
    let staff_name = params.staff.as_deref().filter(|v| *v != "all");
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, EXPORT_LIMIT);

    let logs = ActivityLogRepo::query(&state.pool, action_kind, staff_name, limit).await?;
    Ok(Json(DataResponse { data: logs }))
}

/// GET /activity/export/csv -- most recent records as a CSV attachment.
pub async fn export_csv(
    State(state): State<AppState>,
    RequireStaff(_staff): RequireStaff,
) -> AppResult<impl IntoResponse> {
    let logs = ActivityLogRepo::export_recent(&state.pool, EXPORT_LIMIT).await?;

    let mut csv = String::from("Timestamp,Action,Player,Staff,Table,Details\n");
    for log in &logs {
        csv.push_str(&format!(
            "{},{},{},{},{},\"{}\"\n",
            log.created_at.to_rfc3339(),
            log.action_kind,
            log.player_name.as_deref().unwrap_or(""),
            log.staff_name,
            log.table_number.as_deref().unwrap_or(""),
            log.details.as_deref().unwrap_or("").replace('"', "\"\""),
        ));
    }

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=activity_log.csv",
            ),
        ],
        csv,
    ))
}
