//! Handlers for the `/products` resource.
//!
//! Variants, inventory and dimensions are JSONB documents on the row;
//! the variant/inventory pairing invariant is validated here before any
//! write, merging the stored side when a partial update touches only
//! one of the two lists.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;

use launchos_core::catalog::{
    validate_recipe, validate_sku, validate_variant_inventory_pairing, InventoryItem,
    ProductVariant,
};
use launchos_core::error::CoreError;
use launchos_core::types::DbId;
use launchos_db::models::product::{CreateProduct, Product, UpdateProduct};
use launchos_db::repositories::product_repo::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCatalogo};
use crate::state::AppState;

fn parse_variants(value: &Value) -> Result<Vec<ProductVariant>, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid variants payload: {e}")).into())
}

fn parse_inventory(value: &Value) -> Result<Vec<InventoryItem>, AppError> {
    serde_json::from_value(value.clone())
        .map_err(|e| CoreError::Validation(format!("Invalid inventory payload: {e}")).into())
}

async fn load_product(state: &AppState, id: DbId) -> Result<Product, AppError> {
    ProductRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id,
        })
        .map_err(AppError::from)
}

/// POST /api/v1/workspaces/{id}/products
pub async fn create(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    validate_sku(&input.sku)?;
    validate_recipe(&input.recipe)?;
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Product name must not be empty".to_string()).into());
    }

    let variants = parse_variants(&input.variants)?;
    let inventory = parse_inventory(&input.inventory)?;
    validate_variant_inventory_pairing(&variants, &inventory)?;

    let product = ProductRepo::create(&state.pool, workspace_id, &input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/workspaces/{id}/products
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<Product>>> {
    let products = ProductRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(products))
}

/// GET /api/v1/products/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = load_product(&state, id).await?;
    Ok(Json(product))
}

/// PATCH /api/v1/products/{id}
///
/// When the update touches variants or inventory, the pairing is
/// re-checked against the merged state: the incoming side plus the
/// stored counterpart.
pub async fn update(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let existing = load_product(&state, id).await?;

    if let Some(ref recipe) = input.recipe {
        validate_recipe(recipe)?;
    }
    if let Some(ref name) = input.name {
        if name.trim().is_empty() {
            return Err(
                CoreError::Validation("Product name must not be empty".to_string()).into(),
            );
        }
    }

    if input.variants.is_some() || input.inventory.is_some() {
        let variants = parse_variants(input.variants.as_ref().unwrap_or(&existing.variants))?;
        let inventory = parse_inventory(input.inventory.as_ref().unwrap_or(&existing.inventory))?;
        validate_variant_inventory_pairing(&variants, &inventory)?;
    }

    let product = ProductRepo::update(&state.pool, id, &input).await?;
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireCatalogo(_user): RequireCatalogo,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProductRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Product",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
