//! Repository for the `staff` table.

use pitboss_core::types::DbId;
use sqlx::PgPool;

use crate::models::staff::Staff;

/// Column list for `staff` SELECT queries.
const COLUMNS: &str = "id, username, password_hash, name, role, created_at";

pub struct StaffRepo;

impl StaffRepo {
    pub async fn find_by_username(
        pool: &PgPool,
        username: &str,
    ) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE username = lower($1)");
        sqlx::query_as::<_, Staff>(&query)
            .bind(username)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Staff>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM staff WHERE id = $1");
        sqlx::query_as::<_, Staff>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
