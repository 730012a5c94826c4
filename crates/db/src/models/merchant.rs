//! Merchant feed row entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `merchant_feed_rows` table. One per product; the
/// exported fields, the last validation result and the AI disclosure
/// are JSONB projections of the core structs.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MerchantFeedRow {
    pub id: DbId,
    pub workspace_id: DbId,
    pub product_id: DbId,
    /// JSONB `MerchantFeedFields`.
    pub fields: serde_json::Value,
    /// JSONB `MerchantValidation` from the last validate call.
    pub validation: Option<serde_json::Value>,
    /// JSONB `AiDisclosure`.
    pub disclosure: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for upserting a feed row's exported fields.
#[derive(Debug, Deserialize)]
pub struct UpsertMerchantFeedRow {
    pub fields: serde_json::Value,
    pub disclosure: Option<serde_json::Value>,
}
