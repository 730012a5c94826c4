//! Repository for the `media_sets` table.

use sqlx::PgPool;

use launchos_core::types::DbId;

use crate::models::media::{MediaSet, UpdateMediaSet};

/// Column list for `media_sets` queries.
const COLUMNS: &str =
    "id, workspace_id, product_id, photos, videos, report, created_at, updated_at";

/// Provides operations on per-product media sets.
pub struct MediaSetRepo;

impl MediaSetRepo {
    /// Get the media set for a product, creating an empty one if it
    /// does not exist yet (upsert pattern).
    pub async fn get_or_create(
        pool: &PgPool,
        workspace_id: DbId,
        product_id: DbId,
    ) -> Result<MediaSet, sqlx::Error> {
        let query = format!(
            "INSERT INTO media_sets (workspace_id, product_id) \
             VALUES ($1, $2) \
             ON CONFLICT (product_id) DO UPDATE SET product_id = media_sets.product_id \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MediaSet>(&query)
            .bind(workspace_id)
            .bind(product_id)
            .fetch_one(pool)
            .await
    }

    /// Get a media set by id. Returns `None` if it does not exist.
    pub async fn get(pool: &PgPool, id: DbId) -> Result<Option<MediaSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_sets WHERE id = $1");
        sqlx::query_as::<_, MediaSet>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Get the media set for a product. Returns `None` if absent.
    pub async fn get_by_product(
        pool: &PgPool,
        product_id: DbId,
    ) -> Result<Option<MediaSet>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM media_sets WHERE product_id = $1");
        sqlx::query_as::<_, MediaSet>(&query)
            .bind(product_id)
            .fetch_optional(pool)
            .await
    }

    /// Partial update of a media set by id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMediaSet,
    ) -> Result<MediaSet, sqlx::Error> {
        let mut set_clauses: Vec<String> = vec!["updated_at = NOW()".to_string()];
        let mut param_idx: usize = 2; // $1 is id

        if input.photos.is_some() {
            set_clauses.push(format!("photos = ${param_idx}"));
            param_idx += 1;
        }
        if input.videos.is_some() {
            set_clauses.push(format!("videos = ${param_idx}"));
            param_idx += 1;
        }
        if input.report.is_some() {
            set_clauses.push(format!("report = ${param_idx}"));
            let _ = param_idx;
        }

        let query = format!(
            "UPDATE media_sets SET {} WHERE id = $1 RETURNING {COLUMNS}",
            set_clauses.join(", ")
        );

        let mut q = sqlx::query_as::<_, MediaSet>(&query).bind(id);
        if let Some(ref photos) = input.photos {
            q = q.bind(photos);
        }
        if let Some(ref videos) = input.videos {
            q = q.bind(videos);
        }
        if let Some(ref report) = input.report {
            q = q.bind(report);
        }
        q.fetch_one(pool).await
    }
}
