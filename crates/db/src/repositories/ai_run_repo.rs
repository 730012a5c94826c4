//! Repository for the `ai_runs` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::ai_run::{AiRun, UpdateAiRun, RUN_STATUS_QUEUED, RUN_STATUS_RUNNING};

/// Column list for `ai_runs` queries.
const COLUMNS: &str = "\
    id, workspace_id, product_id, status, include_creatives, stages, \
    artifacts, error, started_at, finished_at, created_at, updated_at";

/// Provides operations on AI pipeline runs.
pub struct AiRunRepo;

impl AiRunRepo {
    /// Insert a new run in `queued` status.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        product_id: DbId,
        include_creatives: bool,
    ) -> Result<AiRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO ai_runs (workspace_id, product_id, include_creatives) \
             VALUES ($1, $2, $3) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AiRun>(&query)
            .bind(workspace_id)
            .bind(product_id)
            .bind(include_creatives)
            .fetch_one(pool)
            .await
    }

    /// Get a run by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<AiRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM ai_runs WHERE id = $1");
        sqlx::query_as::<_, AiRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all runs in a workspace, newest first.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<AiRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_runs WHERE workspace_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AiRun>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// The queued or running run for a workspace, if any. At most one
    /// run is in flight per workspace.
    pub async fn find_active(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Option<AiRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ai_runs \
             WHERE workspace_id = $1 AND status IN ($2, $3) \
             ORDER BY created_at DESC LIMIT 1"
        );
        sqlx::query_as::<_, AiRun>(&query)
            .bind(workspace_id)
            .bind(RUN_STATUS_QUEUED)
            .bind(RUN_STATUS_RUNNING)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of a run by id.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateAiRun) -> Result<AiRun, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.status.is_some() {
            set_clauses.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if input.stages.is_some() {
            set_clauses.push(format!("stages = ${param_idx}"));
            param_idx += 1;
        }
        if input.artifacts.is_some() {
            set_clauses.push(format!("artifacts = ${param_idx}"));
            param_idx += 1;
        }
        if input.error.is_some() {
            set_clauses.push(format!("error = ${param_idx}"));
            param_idx += 1;
        }
        if input.started_at.is_some() {
            set_clauses.push(format!("started_at = ${param_idx}"));
            param_idx += 1;
        }
        if input.finished_at.is_some() {
            set_clauses.push(format!("finished_at = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE ai_runs SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, AiRun>(&query).bind(id);
        if let Some(ref status) = input.status {
            q = q.bind(status);
        }
        if let Some(ref stages) = input.stages {
            q = q.bind(stages);
        }
        if let Some(ref artifacts) = input.artifacts {
            q = q.bind(artifacts);
        }
        if let Some(ref error) = input.error {
            q = q.bind(error);
        }
        if let Some(started_at) = input.started_at {
            q = q.bind(started_at);
        }
        if let Some(finished_at) = input.finished_at {
            q = q.bind(finished_at);
        }
        q.fetch_one(pool).await
    }
}
