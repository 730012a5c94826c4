//! Activity feed entity model and DTOs. Append-only.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Activity {
    pub id: DbId,
    pub workspace_id: DbId,
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
    pub created_at: Timestamp,
}

/// DTO for recording an activity entry.
#[derive(Debug, Deserialize)]
pub struct CreateActivity {
    pub actor: String,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<DbId>,
    pub detail: Option<serde_json::Value>,
}
