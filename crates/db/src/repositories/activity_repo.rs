//! Repository for the `activity_logs` table.
//!
//! The log is append-only; there are no update or delete paths.

use sqlx::PgPool;

use crate::models::activity::{ActivityLog, CreateActivityLog};

/// Column list for `activity_logs` SELECT queries.
const COLUMNS: &str = "\
    id, action_kind, player_id, player_name, staff_id, staff_name, \
    table_number, details, created_at";

pub struct ActivityLogRepo;

impl ActivityLogRepo {
    /// Append one record.
    pub async fn insert(
        pool: &PgPool,
        dto: &CreateActivityLog,
    ) -> Result<ActivityLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO activity_logs \
             (action_kind, player_id, player_name, staff_id, staff_name, table_number, details) \
             VALUES ($1, $2, $3, $4, COALESCE($5, 'System'), $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(dto.action_kind)
            .bind(dto.player_id)
            .bind(&dto.player_name)
            .bind(dto.staff_id)
            .bind(&dto.staff_name)
            .bind(&dto.table_number)
            .bind(&dto.details)
            .fetch_one(pool)
            .await
    }

    /// Most recent records, optionally filtered by action kind and staff
    /// name.
    pub async fn query(
        pool: &PgPool,
        action_kind: Option<&str>,
        staff_name: Option<&str>,
        limit: i64,
    ) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let mut conditions: Vec<String> = Vec::new();
        let mut bind_idx = 1u32;

        if action_kind.is_some() {
            conditions.push(format!("action_kind = ${bind_idx}"));
            bind_idx += 1;
        }
        if staff_name.is_some() {
            conditions.push(format!("staff_name = ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT {COLUMNS} FROM activity_logs {where_clause} \
             ORDER BY created_at DESC LIMIT ${bind_idx}"
        );

        let mut q = sqlx::query_as::<_, ActivityLog>(&query);
        if let Some(kind) = action_kind {
            q = q.bind(kind.to_string());
        }
        if let Some(staff) = staff_name {
            q = q.bind(staff.to_string());
        }
        q.bind(limit).fetch_all(pool).await
    }

    /// Most recent records for CSV export.
    pub async fn export_recent(pool: &PgPool, limit: i64) -> Result<Vec<ActivityLog>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM activity_logs ORDER BY created_at DESC LIMIT $1");
        sqlx::query_as::<_, ActivityLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
