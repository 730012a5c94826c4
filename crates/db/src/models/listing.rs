//! Listing draft entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `listing_drafts` table. One draft per product per
/// marketplace; `copy`, `selected_photo_ids` and `readiness` are JSONB
/// projections of the core structs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ListingDraft {
    pub id: DbId,
    pub workspace_id: DbId,
    pub product_id: DbId,
    pub marketplace_key: String,
    pub status: String,
    /// JSONB `CopyPayload`.
    pub copy: serde_json::Value,
    /// JSONB array of selected photo ids.
    pub selected_photo_ids: serde_json::Value,
    /// JSONB `ListingReadiness` from the last save.
    pub readiness: Option<serde_json::Value>,
    pub published_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a listing draft.
#[derive(Debug, Deserialize)]
pub struct CreateListingDraft {
    pub product_id: DbId,
    pub marketplace_key: String,
    #[serde(default)]
    pub copy: serde_json::Value,
    #[serde(default)]
    pub selected_photo_ids: serde_json::Value,
}

/// DTO for partially updating a listing draft.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateListingDraft {
    pub status: Option<String>,
    pub copy: Option<serde_json::Value>,
    pub selected_photo_ids: Option<serde_json::Value>,
    pub readiness: Option<serde_json::Value>,
    pub published_at: Option<Timestamp>,
}
