//! Repository for the `listing_drafts` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::listing::{CreateListingDraft, ListingDraft, UpdateListingDraft};

/// Column list for `listing_drafts` queries.
const COLUMNS: &str = "\
    id, workspace_id, product_id, marketplace_key, status, copy, \
    selected_photo_ids, readiness, published_at, created_at, updated_at";

/// Provides CRUD operations for listing drafts.
pub struct ListingRepo;

impl ListingRepo {
    /// Insert a new draft in `draft` status.
    pub async fn create(
        pool: &PgPool,
        workspace_id: DbId,
        input: &CreateListingDraft,
    ) -> Result<ListingDraft, sqlx::Error> {
        let query = format!(
            "INSERT INTO listing_drafts \
                 (workspace_id, product_id, marketplace_key, copy, selected_photo_ids) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ListingDraft>(&query)
            .bind(workspace_id)
            .bind(input.product_id)
            .bind(&input.marketplace_key)
            .bind(&input.copy)
            .bind(&input.selected_photo_ids)
            .fetch_one(pool)
            .await
    }

    /// Get a draft by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<ListingDraft>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM listing_drafts WHERE id = $1");
        sqlx::query_as::<_, ListingDraft>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all drafts in a workspace.
    pub async fn list_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Vec<ListingDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listing_drafts \
             WHERE workspace_id = $1 ORDER BY product_id, marketplace_key"
        );
        sqlx::query_as::<_, ListingDraft>(&query)
            .bind(workspace_id)
            .fetch_all(pool)
            .await
    }

    /// List all drafts for a product.
    pub async fn list_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Vec<ListingDraft>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM listing_drafts \
             WHERE product_id = $1 ORDER BY marketplace_key"
        );
        sqlx::query_as::<_, ListingDraft>(&query)
            .bind(product_id)
            .fetch_all(pool)
            .await
    }

    /// Partial update of a draft by id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateListingDraft,
    ) -> Result<ListingDraft, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.status.is_some() {
            set_clauses.push(format!("status = ${param_idx}"));
            param_idx += 1;
        }
        if input.copy.is_some() {
            set_clauses.push(format!("copy = ${param_idx}"));
            param_idx += 1;
        }
        if input.selected_photo_ids.is_some() {
            set_clauses.push(format!("selected_photo_ids = ${param_idx}"));
            param_idx += 1;
        }
        if input.readiness.is_some() {
            set_clauses.push(format!("readiness = ${param_idx}"));
            param_idx += 1;
        }
        if input.published_at.is_some() {
            set_clauses.push(format!("published_at = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE listing_drafts SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, ListingDraft>(&query).bind(id);
        if let Some(ref status) = input.status {
            q = q.bind(status);
        }
        if let Some(ref copy) = input.copy {
            q = q.bind(copy);
        }
        if let Some(ref ids) = input.selected_photo_ids {
            q = q.bind(ids);
        }
        if let Some(ref readiness) = input.readiness {
            q = q.bind(readiness);
        }
        if let Some(published_at) = input.published_at {
            q = q.bind(published_at);
        }
        q.fetch_one(pool).await
    }

    /// Delete a draft by id.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM listing_drafts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
