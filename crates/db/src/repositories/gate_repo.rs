//! Repositories for the `gate_defs` and `gate_runs` tables.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::gate::{CreateGateDef, GateDef, GateRun, GateRunWithDef, UpdateGateRun};

// ---------------------------------------------------------------------------
// GateDefRepo
// ---------------------------------------------------------------------------

/// Column list for `gate_defs` queries.
const DEF_COLUMNS: &str = "\
    id, workspace_id, marketplace_key, gate_key, gate_order, title, \
    requires_auditor, checklist, evidence_types, created_at, updated_at";

/// Provides operations on gate definitions (seeded at onboarding,
/// immutable afterwards).
pub struct GateDefRepo;

impl GateDefRepo {
    /// Insert one gate definition for a workspace.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateGateDef,
    ) -> Result<GateDef, sqlx::Error> {
        let query = format!(
            "INSERT INTO gate_defs \
                 (workspace_id, marketplace_key, gate_key, gate_order, title, requires_auditor, \
                  checklist, evidence_types) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {DEF_COLUMNS}"
        );
        sqlx::query_as::<_, GateDef>(&query)
            .bind(workspace_id)
            .bind(&input.marketplace_key)
            .bind(&input.gate_key)
            .bind(input.gate_order)
            .bind(&input.title)
            .bind(input.requires_auditor)
            .bind(&input.checklist)
            .bind(&input.evidence_types)
            .fetch_one(pool)
            .await
    }

    /// List all definitions for a workspace, onboarding order.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<GateDef>, sqlx::Error> {
        let query = format!(
            "SELECT {DEF_COLUMNS} FROM gate_defs \
             WHERE workspace_id = $1 ORDER BY marketplace_key, gate_order"
        );
        sqlx::query_as::<_, GateDef>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }
}

// ---------------------------------------------------------------------------
// GateRunRepo
// ---------------------------------------------------------------------------

/// Column list for `gate_runs` queries.
const RUN_COLUMNS: &str = "\
    id, workspace_id, gate_def_id, status, checks, evidence, \
    rejection_reason, submitted_at, decided_by, decided_at, created_at, updated_at";

/// Column list for gate runs joined with their definitions. Timestamps
/// come from the run side.
const JOINED_COLUMNS: &str = "\
    r.id, r.workspace_id, r.gate_def_id, r.status, r.checks, r.evidence, \
    r.rejection_reason, r.submitted_at, r.decided_by, r.decided_at, \
    d.marketplace_key, d.gate_key, d.gate_order, d.title, d.requires_auditor, \
    d.checklist, d.evidence_types, r.created_at, r.updated_at";

/// Provides operations on gate run state.
pub struct GateRunRepo;

impl GateRunRepo {
    /// Insert a run for a definition with the given initial status.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        gate_def_id: DbId,
        status: &str,
    ) -> Result<GateRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO gate_runs (workspace_id, gate_def_id, status) \
             VALUES ($1, $2, $3) RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, GateRun>(&query)
            .bind(workspace_id)
            .bind(gate_def_id)
            .bind(status)
            .fetch_one(pool)
            .await
    }

    /// Get a run joined with its definition. Returns `None` if absent.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<GateRunWithDef>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM gate_runs r \
             JOIN gate_defs d ON d.id = r.gate_def_id \
             WHERE r.id = $1"
        );
        sqlx::query_as::<_, GateRunWithDef>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch all gate runs for a workspace, joined with their
    /// definitions, sorted by `(marketplace_key, gate_order)`.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<GateRunWithDef>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM gate_runs r \
             JOIN gate_defs d ON d.id = r.gate_def_id \
             WHERE r.workspace_id = $1 \
             ORDER BY d.marketplace_key, d.gate_order"
        );
        sqlx::query_as::<_, GateRunWithDef>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// The run directly after the given gate in the same marketplace's
    /// sequence, or `None` at the end of the sequence.
    pub async fn successor(
        pool: &PgPool,
        workspace_id: DbId,
        marketplace_key: &str,
        gate_order: i32,
    ) -> Result<Option<GateRunWithDef>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS} FROM gate_runs r \
             JOIN gate_defs d ON d.id = r.gate_def_id \
             WHERE r.workspace_id = $1 AND d.marketplace_key = $2 AND d.gate_order = $3"
        );
        sqlx::query_as::<_, GateRunWithDef>(&query)
            .bind(workspace_id)
            .bind(marketplace_key)
            .bind(gate_order + 1)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of a run by id. Only non-`None` fields are SET;
    /// `updated_at` always advances.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGateRun,
    ) -> Result<GateRun, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.status.is_some() {
            set_clauses.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if input.checks.is_some() {
            set_clauses.push(format!("checks = ${param_idx}"));
            param_idx += 1;
        }
        if input.evidence.is_some() {
            set_clauses.push(format!("evidence = ${param_idx}"));
            param_idx += 1;
        }
        if input.rejection_reason.is_some() {
            set_clauses.push(format!("rejection_reason = ${param_idx}"));
            param_idx += 1;
        }
        if input.submitted_at.is_some() {
            set_clauses.push(format!("submitted_at = ${param_idx}"));
            param_idx += 1;
        }
        if input.decided_by.is_some() {
            set_clauses.push(format!("decided_by = ${param_idx}"));
            param_idx += 1;
        }
        if input.decided_at.is_some() {
            set_clauses.push(format!("decided_at = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE gate_runs SET {} WHERE id = $1 RETURNING {RUN_COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, GateRun>(&query).bind(id);
        if let Some(ref status) = input.status {
            q = q.bind(status);
        }
        if let Some(ref checks) = input.checks {
            q = q.bind(checks);
        }
        if let Some(ref evidence) = input.evidence {
            q = q.bind(evidence);
        }
        if let Some(ref reason) = input.rejection_reason {
            q = q.bind(reason);
        }
        if let Some(submitted_at) = input.submitted_at {
            q = q.bind(submitted_at);
        }
        if let Some(decided_by) = input.decided_by {
            q = q.bind(decided_by);
        }
        if let Some(decided_at) = input.decided_at {
            q = q.bind(decided_at);
        }
        q.fetch_one(pool).await
    }

    /// Clear the rejection reason on a run (used by reopen).
    pub async fn clear_rejection(pool: &PgPool, id: DbId) -> Result<GateRun, sqlx::Error> {
        let query = format!(
            "UPDATE gate_runs \
             SET rejection_reason = NULL, decided_by = NULL, decided_at = NULL, \
                 updated_at = NOW() \
             WHERE id = $1 RETURNING {RUN_COLUMNS}"
        );
        sqlx::query_as::<_, GateRun>(&query)
            .bind(id)
            .fetch_one(pool)
            .await
    }
}
