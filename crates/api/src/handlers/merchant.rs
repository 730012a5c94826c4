//! Handlers for the `/merchant-feed` resource.
//!
//! One feed row per product. Upsert replaces the exported fields and
//! clears any stale validation result; the validate endpoint runs the
//! Merchant Center checks and stores the outcome on the row.

use axum::extract::{Path, State};
use axum::Json;
use serde_json::json;

use launchos_core::error::CoreError;
use launchos_core::merchant::{validate_feed_row, MerchantFeedFields};
use launchos_core::types::DbId;
use launchos_db::models::merchant::{MerchantFeedRow, UpsertMerchantFeedRow};
use launchos_db::repositories::merchant_feed_repo::MerchantFeedRepo;
use launchos_db::repositories::product_repo::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCatalogo};
use crate::state::AppState;

fn parse_fields(value: &serde_json::Value) -> Result<MerchantFeedFields, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid feed fields payload: {e}")).into())
}

/// PUT /api/v1/products/{id}/merchant-feed
///
/// Upserts the product's feed row. The fields payload must at least
/// deserialize; content-level checks run on demand via validate.
pub async fn upsert(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(product_id): Path<DbId>,
    Json(input): Json<UpsertMerchantFeedRow>,
) -> AppResult<Json<MerchantFeedRow>> {
    let product = ProductRepo::get(&state.pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;

    parse_fields(&input.fields)?;

    let row =
        MerchantFeedRepo::upsert(&state.pool, product.workspace_id, product.id, &input).await?;
    Ok(Json(row))
}

/// GET /api/v1/workspaces/{id}/merchant-feed
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<MerchantFeedRow>>> {
    let rows = MerchantFeedRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(rows))
}

/// GET /api/v1/merchant-feed/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<MerchantFeedRow>> {
    let row = MerchantFeedRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MerchantFeedRow",
            id,
        })?;
    Ok(Json(row))
}

/// POST /api/v1/merchant-feed/{id}/validate
///
/// Runs the Merchant Center field checks and stores the result.
/// Warnings (like a missing GTIN/MPN) never fail the row.
pub async fn validate(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
) -> AppResult<Json<MerchantFeedRow>> {
    let row = MerchantFeedRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "MerchantFeedRow",
            id,
        })?;

    let fields = parse_fields(&row.fields)?;
    let validation = validate_feed_row(&fields);

    let updated = MerchantFeedRepo::set_validation(&state.pool, id, &json!(validation)).await?;
    Ok(Json(updated))
}
