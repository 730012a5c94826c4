//! Handlers for the workspace activity feed.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use launchos_core::types::DbId;
use launchos_db::models::activity::Activity;
use launchos_db::repositories::activity_repo::ActivityRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

/// GET /api/v1/workspaces/{id}/activities
///
/// Newest first. `?limit=` caps the page size, clamped to 1..=200.
pub async fn list_by_workspace(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(workspace_id): Path<DbId>,
    Query(query): Query<ActivityQuery>,
) -> AppResult<Json<Vec<Activity>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let activities = ActivityRepo::list_by_workspace(&state.pool, workspace_id, limit).await?;
    Ok(Json(activities))
}
