//! Repository for the `war_tasks` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::task::{CreateWarTask, UpdateWarTask, WarTask};

/// Column list for `war_tasks` queries.
const COLUMNS: &str = "\
    id, workspace_id, marketplace_key, task_type, title, priority, \
    impact, owner_role, status, notes, result, task_date, created_at, \
    updated_at";

/// Provides operations on war-room tasks.
pub struct WarTaskRepo;

impl WarTaskRepo {
    /// Insert a new task in `todo` status.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateWarTask,
    ) -> Result<WarTask, sqlx::Error> {
        let query = format!(
            "INSERT INTO war_tasks \
                 (workspace_id, marketplace_key, task_type, title, priority, impact, \
                  owner_role, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WarTask>(&query)
            .bind(workspace_id)
            .bind(&input.marketplace_key)
            .bind(&input.task_type)
            .bind(&input.title)
            .bind(input.priority)
            .bind(input.impact)
            .bind(&input.owner_role)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Get a task by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<WarTask>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM war_tasks WHERE id = $1");
        sqlx::query_as::<_, WarTask>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all tasks in a workspace in board order: open tasks first,
    /// then by ascending priority, then by descending impact.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<WarTask>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM war_tasks WHERE workspace_id = $1 \
             ORDER BY (status = 'done'), priority, impact DESC"
        );
        sqlx::query_as::<_, WarTask>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Partial update of a task by id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateWarTask,
    ) -> Result<WarTask, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.status.is_some() {
            set_clauses.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if input.priority.is_some() {
            set_clauses.push(format!("priority = ${param_idx}"));
            param_idx += 1;
        }
        if input.impact.is_some() {
            set_clauses.push(format!("impact = ${param_idx}"));
            param_idx += 1;
        }
        if input.notes.is_some() {
            set_clauses.push(format!("notes = ${param_idx}"));
            param_idx += 1;
        }
        if input.result.is_some() {
            set_clauses.push(format!("result = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE war_tasks SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, WarTask>(&query).bind(id);
        if let Some(ref status) = input.status {
            q = q.bind(status);
        }
        if let Some(priority) = input.priority {
            q = q.bind(priority);
        }
        if let Some(impact) = input.impact {
            q = q.bind(impact);
        }
        if let Some(ref notes) = input.notes {
            q = q.bind(notes);
        }
        if let Some(ref result) = input.result {
            q = q.bind(result);
        }
        q.fetch_one(pool).await
    }

    /// Delete a task by id. Returns `true` when a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM war_tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
