//! Gate definition and gate run models and DTOs.
//!
//! A `GateDef` is the immutable checklist template for one gate of one
//! marketplace's onboarding sequence; a `GateRun` is the mutable
//! progress state for it. JSONB columns hold the checklist template,
//! the check map and the attached evidence.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `gate_defs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GateDef {
    pub id: DbId,
    pub workspace_id: DbId,
    pub marketplace_key: String,
    pub gate_key: String,
    pub gate_order: i32,
    pub title: String,
    /// Whether submissions of this gate need an auditor decision.
    pub requires_auditor: bool,
    /// JSONB array of `GateCheckItem`.
    pub checklist: serde_json::Value,
    /// JSONB array of evidence type strings.
    pub evidence_types: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for seeding a gate definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateGateDef {
    pub marketplace_key: String,
    pub gate_key: String,
    pub gate_order: i32,
    pub title: String,
    pub requires_auditor: bool,
    pub checklist: serde_json::Value,
    pub evidence_types: serde_json::Value,
}

/// A row from the `gate_runs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GateRun {
    pub id: DbId,
    pub workspace_id: DbId,
    pub gate_def_id: DbId,
    pub status: String,
    /// JSONB object mapping checklist item key to checked flag.
    pub checks: serde_json::Value,
    /// JSONB array of `EvidenceRef`.
    pub evidence: serde_json::Value,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<Timestamp>,
    /// User id of the auditor who approved or rejected the run.
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partially updating a gate run. `None` fields are left
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateGateRun {
    pub status: Option<String>,
    pub checks: Option<serde_json::Value>,
    pub evidence: Option<serde_json::Value>,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
}

/// A gate run joined with its definition, the shape handlers work with.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GateRunWithDef {
    pub id: DbId,
    pub workspace_id: DbId,
    pub gate_def_id: DbId,
    pub status: String,
    pub checks: serde_json::Value,
    pub evidence: serde_json::Value,
    pub rejection_reason: Option<String>,
    pub submitted_at: Option<Timestamp>,
    pub decided_by: Option<DbId>,
    pub decided_at: Option<Timestamp>,
    pub marketplace_key: String,
    pub gate_key: String,
    pub gate_order: i32,
    pub title: String,
    pub requires_auditor: bool,
    pub checklist: serde_json::Value,
    pub evidence_types: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
