//! Product entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `products` table. Variants, inventory and dimensions
/// live as JSONB documents on the row; the variant/inventory pairing
/// invariant is validated in core before any write.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub workspace_id: DbId,
    pub sku: String,
    pub name: String,
    pub recipe: String,
    pub attributes: serde_json::Value,
    /// JSONB array of `ProductVariant`.
    pub variants: serde_json::Value,
    /// JSONB array of `InventoryItem`.
    pub inventory: serde_json::Value,
    /// JSONB `Dimensions`, if set.
    pub dimensions: Option<serde_json::Value>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a product.
#[derive(Debug, Deserialize)]
pub struct CreateProduct {
    pub sku: String,
    pub name: String,
    pub recipe: String,
    #[serde(default)]
    pub attributes: serde_json::Value,
    #[serde(default)]
    pub variants: serde_json::Value,
    #[serde(default)]
    pub inventory: serde_json::Value,
    pub dimensions: Option<serde_json::Value>,
}

/// DTO for partially updating a product.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub recipe: Option<String>,
    pub attributes: Option<serde_json::Value>,
    pub variants: Option<serde_json::Value>,
    pub inventory: Option<serde_json::Value>,
    pub dimensions: Option<serde_json::Value>,
}
