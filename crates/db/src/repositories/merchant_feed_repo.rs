//! Repository for the `merchant_feed_rows` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::merchant::{MerchantFeedRow, UpsertMerchantFeedRow};

/// Column list for `merchant_feed_rows` queries.
const COLUMNS: &str = "\
    id, workspace_id, product_id, fields, validation, disclosure, \
    created_at, updated_at";

/// Provides operations on merchant feed rows.
pub struct MerchantFeedRepo;

impl MerchantFeedRepo {
    /// Upsert the feed row for a product, replacing the exported fields
    /// and disclosure. A stale validation result is cleared.
    pub async fn upsert(
        pool: &PgPool,
        workspace_id: DbId,
        product_id: DbId,
        input: &UpsertMerchantFeedRow,
    ) -> Result<MerchantFeedRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO merchant_feed_rows (workspace_id, product_id, fields, disclosure) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (product_id) DO UPDATE \
             SET fields = EXCLUDED.fields, \
                 disclosure = EXCLUDED.disclosure, \
                 validation = NULL, \
                 updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MerchantFeedRow>(&query)
            .bind(workspace_id)
            .bind(product_id)
            .bind(&input.fields)
            .bind(&input.disclosure)
            .fetch_one(pool)
            .await
    }

    /// Get a feed row by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<MerchantFeedRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM merchant_feed_rows WHERE id = $1");
        sqlx::query_as::<_, MerchantFeedRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all feed rows in a workspace.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<MerchantFeedRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM merchant_feed_rows \
             WHERE workspace_id = $1 ORDER BY product_id"
        );
        sqlx::query_as::<_, MerchantFeedRow>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// Store the result of a validation pass on a feed row.
    pub async fn set_validation(
        pool: &PgPool,
        id: DbId,
        validation: &serde_json::Value,
    ) -> Result<MerchantFeedRow, sqlx::Error> {
        let query = format!(
            "UPDATE merchant_feed_rows SET validation = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MerchantFeedRow>(&query)
            .bind(id)
            .bind(validation)
            .fetch_one(pool)
            .await
    }
}
