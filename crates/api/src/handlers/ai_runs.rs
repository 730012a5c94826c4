//! Handlers for the `/ai-runs` resource.
//!
//! Starting a run spawns the mock pipeline as a background task and
//! returns immediately; progress lands on the run row as stages finish.
//! At most one run is in flight per workspace, enforced both against
//! the database and the in-process run manager.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use launchos_core::catalog::Dimensions;
use launchos_core::error::CoreError;
use launchos_core::marketplace::validate_marketplace;
use launchos_core::media::MediaAsset;
use launchos_core::types::DbId;
use launchos_db::models::ai_run::{
    AiRun, UpdateAiRun, RUN_STATUS_CANCELLED, RUN_STATUS_COMPLETED, RUN_STATUS_FAILED,
    RUN_STATUS_RUNNING,
};
use launchos_db::models::product::Product;
use launchos_db::repositories::ai_run_repo::AiRunRepo;
use launchos_db::repositories::media_set_repo::MediaSetRepo;
use launchos_db::repositories::product_repo::ProductRepo;
use launchos_pipeline::{
    run_pipeline, CopyMode, PipelineInput, ProductInput, RunOutcome, RunnerConfig,
};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireCatalogo};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Start
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct StartAiRun {
    pub marketplace_key: String,
    #[serde(default)]
    pub include_creatives: bool,
    #[serde(default)]
    pub copy_mode: CopyMode,
}

/// POST /api/v1/products/{id}/ai-runs
///
/// Creates the run row in `queued` status, registers it with the run
/// manager and spawns the pipeline task. Returns 202 with the queued
/// run.
pub async fn start(
    State(state): State<AppState>,
    RequireCatalogo(user): RequireCatalogo,
    Path(product_id): Path<DbId>,
    Json(input): Json<StartAiRun>,
) -> AppResult<(StatusCode, Json<AiRun>)> {
    validate_marketplace(&input.marketplace_key)?;

    let product = ProductRepo::get(&state.pool, product_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Product",
            id: product_id,
        })?;
    let workspace_id = product.workspace_id;

    if AiRunRepo::find_active(&state.pool, workspace_id).await?.is_some()
        || state.runs.get(workspace_id).is_some()
    {
        return Err(CoreError::Conflict(
            "Workspace already has an AI run in flight".to_string(),
        )
        .into());
    }

    let pipeline_input = build_pipeline_input(&state, &product, &input).await?;

    let run =
        AiRunRepo::create(&state.pool, workspace_id, product_id, input.include_creatives).await?;

    let Some(cancel) = state.runs.register(workspace_id, run.id) else {
        // Lost the race against a concurrent start.
        AiRunRepo::update(
            &state.pool,
            run.id,
            &UpdateAiRun {
                status: Some(RUN_STATUS_FAILED.to_string()),
                error: Some("Another run was started concurrently".to_string()),
                finished_at: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await?;
        return Err(CoreError::Conflict(
            "Workspace already has an AI run in flight".to_string(),
        )
        .into());
    };

    let pool = state.pool.clone();
    let runs = state.runs.clone();
    let run_id = run.id;
    tokio::spawn(async move {
        execute_run(pool, run_id, workspace_id, pipeline_input, cancel).await;
        runs.finish(workspace_id, run_id);
    });

    super::record_activity(
        &state.pool,
        workspace_id,
        &user,
        "ai_run_started",
        "ai_run",
        Some(run.id),
        Some(json!({
            "product_id": product_id,
            "include_creatives": input.include_creatives,
        })),
    )
    .await;

    Ok((StatusCode::ACCEPTED, Json(run)))
}

/// Assemble the pipeline input from the product row and its media set.
async fn build_pipeline_input(
    state: &AppState,
    product: &Product,
    start: &StartAiRun,
) -> Result<PipelineInput, AppError> {
    let photos: Vec<MediaAsset> =
        match MediaSetRepo::get_by_product(&state.pool, product.id).await? {
            Some(media_set) => serde_json::from_value(media_set.photos)
                .map_err(|e| AppError::InternalError(format!("Corrupt media set photos: {e}")))?,
            None => Vec::new(),
        };

    let variants = serde_json::from_value(product.variants.clone())
        .map_err(|e| AppError::InternalError(format!("Corrupt product variants: {e}")))?;
    let dims: Dimensions = match &product.dimensions {
        Some(value) => serde_json::from_value(value.clone())
            .map_err(|e| AppError::InternalError(format!("Corrupt product dimensions: {e}")))?,
        None => Dimensions::default(),
    };

    let attrs = &product.attributes;
    let materials = attrs
        .get("materials")
        .and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok())
        .unwrap_or_default();
    let str_attr =
        |key: &str| attrs.get(key).and_then(|v| v.as_str()).map(String::from);

    Ok(PipelineInput {
        product: ProductInput {
            title_base: product.name.clone(),
            brand: str_attr("brand").unwrap_or_default(),
            sku_master: product.sku.clone(),
            recipe: product.recipe.clone(),
            category: str_attr("category"),
            description: str_attr("description"),
            materials,
            variants,
            dims,
        },
        photos,
        marketplace_key: start.marketplace_key.clone(),
        copy_mode: start.copy_mode,
        include_creatives: start.include_creatives,
    })
}

/// The background task body: marks the run running, drives the
/// pipeline and lands the terminal status plus artifacts on the row.
async fn execute_run(
    pool: launchos_db::DbPool,
    run_id: DbId,
    workspace_id: DbId,
    input: PipelineInput,
    cancel: tokio_util::sync::CancellationToken,
) {
    let marked = AiRunRepo::update(
        &pool,
        run_id,
        &UpdateAiRun {
            status: Some(RUN_STATUS_RUNNING.to_string()),
            started_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await;
    if let Err(e) = marked {
        tracing::error!(run_id, error = %e, "Failed to mark AI run running");
        return;
    }

    let outcome = run_pipeline(&input, &RunnerConfig::default(), cancel).await;
    let status = match outcome.outcome {
        RunOutcome::Completed => RUN_STATUS_COMPLETED,
        RunOutcome::Cancelled => RUN_STATUS_CANCELLED,
    };
    tracing::info!(
        run_id,
        workspace_id,
        status,
        stages = outcome.completed.len(),
        "AI pipeline run finished"
    );

    let result = AiRunRepo::update(
        &pool,
        run_id,
        &UpdateAiRun {
            status: Some(status.to_string()),
            stages: Some(json!(outcome.completed)),
            artifacts: Some(json!(outcome.artifacts)),
            finished_at: Some(Utc::now()),
            ..Default::default()
        },
    )
    .await;
    if let Err(e) = result {
        tracing::error!(run_id, error = %e, "Failed to persist AI run outcome");
    }
}

// ---------------------------------------------------------------------------
// Reads and cancel
// ---------------------------------------------------------------------------

/// GET /api/v1/workspaces/{id}/ai-runs
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<AiRun>>> {
    let runs = AiRunRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(runs))
}

/// GET /api/v1/ai-runs/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<AiRun>> {
    let run = AiRunRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "AiRun",
            id,
        })?;
    Ok(Json(run))
}

/// POST /api/v1/workspaces/{id}/ai-runs/cancel
///
/// Fires the cancellation token of the workspace's active run. The
/// runner stops before its next stage and the task records the
/// `cancelled` status itself.
pub async fn cancel(
    State(state): State<AppState>,
    RequireCatalogo(user): RequireCatalogo,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let Some(run_id) = state.runs.cancel(workspace_id) else {
        return Err(AppError::BadRequest(
            "Workspace has no AI run in flight".to_string(),
        ));
    };

    super::record_activity(
        &state.pool,
        workspace_id,
        &user,
        "ai_run_cancelled",
        "ai_run",
        Some(run_id),
        None,
    )
    .await;
    Ok(Json(json!({ "run_id": run_id, "cancelled": true })))
}
