//! Handlers for the `/listings` resource.
//!
//! Readiness is recomputed on every save from the draft's copy, its
//! selected photos and the marketplace's publish gate. The stored
//! `readiness` column is only a cache of the last computation; publish
//! always recomputes before deciding.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use launchos_core::error::CoreError;
use launchos_core::gate::GateStatus;
use launchos_core::listing::{
    compute_readiness, status_after_save, validate_publish, CopyPayload, ListingReadiness,
    ListingStatus,
};
use launchos_core::marketplace::validate_marketplace;
use launchos_core::media::{validate_photo_selection, MediaAsset};
use launchos_core::types::DbId;
use launchos_db::models::listing::{CreateListingDraft, ListingDraft, UpdateListingDraft};
use launchos_db::repositories::gate_repo::GateRunRepo;
use launchos_db::repositories::listing_repo::ListingRepo;
use launchos_db::repositories::media_set_repo::MediaSetRepo;
use launchos_db::repositories::product_repo::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCatalogo};
use crate::seeds::GATE_PUBLISH;
use crate::state::AppState;

async fn load_draft(state: &AppState, id: DbId) -> Result<ListingDraft, AppError> {
    ListingRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "ListingDraft",
            id,
        })
        .map_err(AppError::from)
}

/// The publish gate status for one marketplace in a workspace, if the
/// gate exists.
async fn publish_gate_status(
    state: &AppState,
    workspace_id: DbId,
    marketplace_key: &str,
) -> Result<Option<GateStatus>, AppError> {
    let gates = GateRunRepo::list_by_workspace(&state.pool, workspace_id).await?;
    gates
        .iter()
        .find(|g| g.marketplace_key == marketplace_key && g.gate_key == GATE_PUBLISH)
        .map(|g| GateStatus::from_str_value(&g.status))
        .transpose()
        .map_err(AppError::from)
}

/// The photo assets of a product's media set, empty when no set exists.
async fn product_photos(state: &AppState, product_id: DbId) -> Result<Vec<MediaAsset>, AppError> {
    let Some(media_set) = MediaSetRepo::get_by_product(&state.pool, product_id).await? else {
        return Ok(Vec::new());
    };
    serde_json::from_value(media_set.photos)
        .map_err(|e| AppError::InternalError(format!("Corrupt media set photos: {e}")))
}

fn parse_copy(value: &serde_json::Value) -> Result<CopyPayload, AppError> {
    if value.is_null() {
        return Ok(CopyPayload::default());
    }
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid copy payload: {e}")).into())
}

fn parse_selected_ids(value: &serde_json::Value) -> Result<Vec<String>, AppError> {
    if value.is_null() {
        return Ok(Vec::new());
    }
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid photo selection payload: {e}")).into())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/workspaces/{id}/listings
pub async fn create(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateListingDraft>,
) -> AppResult<(StatusCode, Json<ListingDraft>)> {
    validate_marketplace(&input.marketplace_key)?;
    let product = ProductRepo::get(&state.pool, input.product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: input.product_id,
        })?;
    if product.workspace_id != workspace_id {
        return Err(CoreError::Validation(
            "Product does not belong to this workspace".to_string(),
        )
        .into());
    }

    parse_copy(&input.copy)?;
    let selected = parse_selected_ids(&input.selected_photo_ids)?;
    let photos = product_photos(&state, input.product_id).await?;
    validate_photo_selection(&selected, &photos)?;

    let draft = ListingRepo::create(&state.pool, workspace_id, &input).await?;
    Ok((StatusCode::CREATED, Json(draft)))
}

/// GET /api/v1/workspaces/{id}/listings
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<ListingDraft>>> {
    let drafts = ListingRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(drafts))
}

/// GET /api/v1/products/{id}/listings
pub async fn list_by_product(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(product_id): Path<DbId>,
) -> AppResult<Json<Vec<ListingDraft>>> {
    let drafts = ListingRepo::list_by_product(&state.pool, product_id).await?;
    Ok(Json(drafts))
}

/// GET /api/v1/listings/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListingDraft>> {
    let draft = load_draft(&state, id).await?;
    Ok(Json(draft))
}

/// DELETE /api/v1/listings/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ListingRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "ListingDraft",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Save and publish
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SaveListing {
    pub copy: CopyPayload,
    #[serde(default)]
    pub selected_photo_ids: Vec<String>,
}

/// PUT /api/v1/listings/{id}
///
/// Replaces the editable fields, recomputes readiness and derives the
/// status: `ready` when readiness clears, else `draft`. Published
/// drafts keep their status but still refresh the readiness snapshot.
pub async fn save(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
    Json(input): Json<SaveListing>,
) -> AppResult<Json<ListingDraft>> {
    let draft = load_draft(&state, id).await?;
    let current = ListingStatus::from_str_value(&draft.status)?;

    let photos = product_photos(&state, draft.product_id).await?;
    validate_photo_selection(&input.selected_photo_ids, &photos)?;

    let gate_status =
        publish_gate_status(&state, draft.workspace_id, &draft.marketplace_key).await?;
    let readiness = compute_readiness(&input.copy, input.selected_photo_ids.len(), gate_status);
    let next_status = status_after_save(current, &readiness);

    let updated = ListingRepo::update(
        &state.pool,
        id,
        &UpdateListingDraft {
            status: Some(next_status.as_str().to_string()),
            copy: Some(json!(input.copy)),
            selected_photo_ids: Some(json!(input.selected_photo_ids)),
            readiness: Some(json!(readiness)),
            published_at: None,
        },
    )
    .await?;
    Ok(Json(updated))
}

/// POST /api/v1/listings/{id}/publish
///
/// Recomputes readiness from current state, then requires both a clear
/// readiness and an approved publish gate. Publication is terminal.
pub async fn publish(
    State(state): State<AppState>,
    RequireCatalogo(user): RequireCatalogo,
    Path(id): Path<DbId>,
) -> AppResult<Json<ListingDraft>> {
    let draft = load_draft(&state, id).await?;
    let current = ListingStatus::from_str_value(&draft.status)?;

    let copy = parse_copy(&draft.copy)?;
    let selected = parse_selected_ids(&draft.selected_photo_ids)?;
    let gate_status =
        publish_gate_status(&state, draft.workspace_id, &draft.marketplace_key).await?;

    let readiness: ListingReadiness = compute_readiness(&copy, selected.len(), gate_status);
    validate_publish(current, &readiness, gate_status)?;

    let updated = ListingRepo::update(
        &state.pool,
        id,
        &UpdateListingDraft {
            status: Some(ListingStatus::Published.as_str().to_string()),
            readiness: Some(json!(readiness)),
            published_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await?;

    super::record_activity(
        &state.pool,
        draft.workspace_id,
        &user,
        "listing_published",
        "listing_draft",
        Some(id),
        Some(json!({ "marketplace": draft.marketplace_key })),
    )
    .await;
    Ok(Json(updated))
}
