//! Handlers for the war-room task board.
//!
//! Tasks belong to a role; any member may read the board, but a task
//! only moves by the hand of its owning role or an admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::json;

use launchos_core::error::CoreError;
use launchos_core::marketplace::validate_marketplace;
use launchos_core::roles::validate_role;
use launchos_core::task::{
    can_edit_task, validate_impact, validate_priority, validate_task_status, validate_task_type,
    TASK_STATUS_DONE,
};
use launchos_core::types::DbId;
use launchos_db::models::task::{CreateWarTask, UpdateWarTask, WarTask};
use launchos_db::repositories::task_repo::WarTaskRepo;

use crate::error::AppResult;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::state::AppState;

/// POST /api/v1/workspaces/{id}/tasks
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(workspace_id): Path<DbId>,
    Json(input): Json<CreateWarTask>,
) -> AppResult<(StatusCode, Json<WarTask>)> {
    validate_marketplace(&input.marketplace_key)?;
    validate_task_type(&input.task_type)?;
    validate_priority(input.priority)?;
    validate_impact(input.impact)?;
    validate_role(&input.owner_role).map_err(CoreError::Validation)?;
    if input.title.trim().is_empty() {
        return Err(CoreError::Validation("Task title must not be empty".to_string()).into());
    }

    let task = WarTaskRepo::create(&state.pool, workspace_id, &input).await?;

    super::record_activity(
        &state.pool,
        workspace_id,
        &user,
        "task_created",
        "war_task",
        Some(task.id),
        Some(json!({ "title": task.title, "owner_role": task.owner_role })),
    )
    .await;
    Ok((StatusCode::CREATED, Json(task)))
}

/// GET /api/v1/workspaces/{id}/tasks
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
) -> AppResult<Json<Vec<WarTask>>> {
    let tasks = WarTaskRepo::list_by_workspace(&state.pool, workspace_id).await?;
    Ok(Json(tasks))
}

/// GET /api/v1/tasks/{id}
pub async fn get(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<WarTask>> {
    let task = load_task(&state, id).await?;
    Ok(Json(task))
}

/// PATCH /api/v1/tasks/{id}
///
/// Moves or edits a task. Only the owning role (or an admin) may touch
/// it; completing a task lands a `task_completed` feed entry.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateWarTask>,
) -> AppResult<Json<WarTask>> {
    let task = load_task(&state, id).await?;
    if !can_edit_task(&user.role, &task.owner_role) {
        return Err(CoreError::Forbidden(format!(
            "Task is owned by role '{}'",
            task.owner_role
        ))
        .into());
    }

    if let Some(ref status) = input.status {
        validate_task_status(status)?;
    }
    if let Some(priority) = input.priority {
        validate_priority(priority)?;
    }
    if let Some(impact) = input.impact {
        validate_impact(impact)?;
    }

    let updated = WarTaskRepo::update(&state.pool, id, &input).await?;

    let completed =
        updated.status == TASK_STATUS_DONE && task.status != TASK_STATUS_DONE;
    if completed {
        super::record_activity(
            &state.pool,
            task.workspace_id,
            &user,
            "task_completed",
            "war_task",
            Some(id),
            Some(json!({ "title": updated.title, "impact": updated.impact })),
        )
        .await;
    }
    Ok(Json(updated))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_user): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = WarTaskRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(CoreError::NotFound {
            entity: "WarTask",
            id,
        }
        .into());
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn load_task(state: &AppState, id: DbId) -> Result<WarTask, crate::error::AppError> {
    let task = WarTaskRepo::get(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "WarTask",
            id,
        })?;
    Ok(task)
}
