//! Repository for the append-only `activities` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::activity::{Activity, CreateActivity};

/// Column list for `activities` queries.
const COLUMNS: &str =
    "id, workspace_id, actor, action, entity_type, entity_id, detail, created_at";

/// Provides operations on the activity feed.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Record an activity entry.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateActivity,
    ) -> Result<Activity, sqlx::Error> {
        let query = format!(
            "INSERT INTO activities (workspace_id, actor, action, entity_type, entity_id, detail) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(workspace_id)
            .bind(&input.actor)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.detail)
            .fetch_one(pool)
            .await
    }

    /// List recent activity for a workspace, newest first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        limit: i64,
    ) -> Result<Vec<Activity>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM activities \
             WHERE workspace_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        );
        sqlx::query_as::<_, Activity>(&query)
            .bind(workspace_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
