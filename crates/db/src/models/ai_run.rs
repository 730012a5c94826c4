//! AI run entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

pub const RUN_STATUS_QUEUED: &str = "queued";
pub const RUN_STATUS_RUNNING: &str = "running";
pub const RUN_STATUS_COMPLETED: &str = "completed";
pub const RUN_STATUS_CANCELLED: &str = "cancelled";
pub const RUN_STATUS_FAILED: &str = "failed";

/// All valid AI run statuses.
pub const VALID_RUN_STATUSES: &[&str] = &[
    RUN_STATUS_QUEUED,
    RUN_STATUS_RUNNING,
    RUN_STATUS_COMPLETED,
    RUN_STATUS_CANCELLED,
    RUN_STATUS_FAILED,
];

/// A row from the `ai_runs` table. `stages` accumulates one JSONB
/// entry per completed stage (stage key, model, provider, summary).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AiRun {
    pub id: DbId,
    pub workspace_id: DbId,
    pub product_id: DbId,
    pub status: String,
    pub include_creatives: bool,
    pub stages: serde_json::Value,
    /// JSONB `PipelineArtifacts` once the run finishes.
    pub artifacts: Option<serde_json::Value>,
    pub error: Option<String>,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partially updating a run as the pipeline progresses.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateAiRun {
    pub status: Option<String>,
    pub stages: Option<serde_json::Value>,
    pub artifacts: Option<serde_json::Value>,
    pub error: Option<String>,
    pub started_at: Option<Timestamp>,
    pub finished_at: Option<Timestamp>,
}
