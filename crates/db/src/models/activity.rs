//! Activity log models.

use pitboss_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `activity_logs` table. Append-only.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActivityLog {
    pub id: DbId,
    pub action_kind: String,
    pub player_id: Option<DbId>,
    pub player_name: Option<String>,
    pub staff_id: Option<DbId>,
    pub staff_name: String,
    pub table_number: Option<String>,
    pub details: Option<String>,
    pub created_at: Timestamp,
}

/// DTO for appending one record.
///
/// `staff_name` defaults to `"System"` for records produced by the
/// background schedulers.
#[derive(Debug, Default)]
pub struct CreateActivityLog {
    pub action_kind: &'static str,
    pub player_id: Option<DbId>,
    pub player_name: Option<String>,
    pub staff_id: Option<DbId>,
    pub staff_name: Option<String>,
    pub table_number: Option<String>,
    pub details: Option<String>,
}

/// Query parameters for the activity feed.
#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
    pub action_kind: Option<String>,
    pub staff: Option<String>,
}
