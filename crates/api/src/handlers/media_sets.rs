//! Handlers for the `/media-sets` resource.
//!
//! A product has at most one media set; the per-product GET creates an
//! empty set on first access. Photo updates validate roles and tracks
//! before the JSONB write.

use axum::extract::{Path, State};
use axum::Json;

use launchos_core::error::CoreError;
use launchos_core::media::{validate_media_role, validate_media_track, MediaAsset};
use launchos_core::types::DbId;
use launchos_db::models::media::{MediaSet, UpdateMediaSet};
use launchos_db::repositories::media_set_repo::MediaSetRepo;
use launchos_db::repositories::product_repo::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCatalogo};
use crate::state::AppState;

/// GET /api/v1/products/{id}/media-set
///
/// Returns the product's media set, creating an empty one on first
/// access.
pub async fn get_for_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<MediaSet>> {
    let product = ProductRepo::get(&state.pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;

    let media_set =
        MediaSetRepo::get_or_create(&state.pool, product.workspace_id, product.id).await?;
    Ok(Json(media_set))
}

/// GET /api/v1/media-sets/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MediaSet>> {
    let media_set = MediaSetRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MediaSet",
            id,
        })?;
    Ok(Json(media_set))
}

/// PATCH /api/v1/media-sets/{id}
///
/// Replaces the photo and/or video arrays. Each incoming photo must
/// carry a known role and track.
pub async fn update(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMediaSet>,
) -> AppResult<Json<MediaSet>> {
    MediaSetRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MediaSet",
            id,
        })?;

    if let Some(ref photos) = input.photos {
        let photos: Vec<MediaAsset> = serde_json::from_value(photos.clone())
            .map_err(|e| AppError::from(CoreError::Validation(format!("Invalid photos payload: {e}"))))?;
        for photo in &photos {
            validate_media_role(&photo.role)?;
            validate_media_track(&photo.track)?;
        }
    }

    let media_set = MediaSetRepo::update(&state.pool, id, &input).await?;
    Ok(Json(media_set))
}
