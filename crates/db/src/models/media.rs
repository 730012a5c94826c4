//! Media set entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `media_sets` table. One per product.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MediaSet {
    pub id: DbId,
    pub workspace_id: DbId,
    pub product_id: DbId,
    /// JSONB array of `MediaAsset`.
    pub photos: serde_json::Value,
    /// JSONB array of `VideoAsset`.
    pub videos: serde_json::Value,
    /// JSONB `MediaReport`, if a quality pass has run.
    pub report: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partially updating a media set.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateMediaSet {
    pub photos: Option<serde_json::Value>,
    pub videos: Option<serde_json::Value>,
    pub report: Option<serde_json::Value>,
}
