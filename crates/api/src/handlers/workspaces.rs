//! Handlers for the `/workspaces` resource.
//!
//! Creating a workspace performs onboarding: the default gate
//! definitions are seeded for every wave-1 marketplace, with one gate
//! run each, and gate #1 of each sequence starting `in_progress`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use launchos_core::error::CoreError;
use launchos_core::gate::initial_status;
use launchos_core::types::DbId;
use launchos_db::models::workspace::{CreateWorkspace, Workspace};
use launchos_db::repositories::gate_repo::{GateDefRepo, GateRunRepo};
use launchos_db::repositories::workspace_repo::WorkspaceRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireCadastro};
use crate::seeds::default_gate_defs;
use crate::state::AppState;

/// POST /api/v1/workspaces
///
/// Creates the workspace and seeds its onboarding gates.
pub async fn create(
    State(state): State<AppState>,
    RequireCadastro(user): RequireCadastro,
    Json(input): Json<CreateWorkspace>,
) -> AppResult<(StatusCode, Json<Workspace>)> {
    if input.name.trim().is_empty() {
        return Err(CoreError::Validation("Workspace name must not be empty".to_string()).into());
    }

    let workspace = WorkspaceRepo::create(&state.pool, &input).await?;

    for def_input in default_gate_defs() {
        let def = GateDefRepo::create(&state.pool, workspace.id, &def_input).await?;
        GateRunRepo::create(
            &state.pool,
            workspace.id,
            def.id,
            initial_status(def.gate_order).as_str(),
        )
        .await?;
    }

    super::record_activity(
        &state.pool,
        workspace.id,
        &user,
        "workspace_created",
        "workspace",
        Some(workspace.id),
        None,
    )
    .await;

    tracing::info!(workspace_id = workspace.id, "Workspace onboarded");
    Ok((StatusCode::CREATED, Json(workspace)))
}

/// GET /api/v1/workspaces
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<Vec<Workspace>>> {
    let workspaces = WorkspaceRepo::list(&state.pool).await?;
    Ok(Json(workspaces))
}

/// GET /api/v1/workspaces/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Workspace>> {
    let workspace = WorkspaceRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Workspace",
            id,
        })?;
    Ok(Json(workspace))
}

/// DELETE /api/v1/workspaces/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WorkspaceRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "Workspace",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}
