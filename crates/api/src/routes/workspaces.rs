//! Route definitions for the `/workspaces` resource.
//!
//! Workspace-scoped sub-resources (gates, products, listings, the
//! merchant feed, AI runs and the activity feed) are mounted here so
//! every collection read hangs off its workspace.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    activities, ai_runs, gates, listings, merchant, products, tasks, workspaces,
};
use crate::state::AppState;

/// Routes mounted at `/workspaces`.
///
/// ```text
/// GET    /                      -> list
/// POST   /                      -> create (seeds onboarding gates)
/// GET    /{id}                  -> get
/// DELETE /{id}                  -> delete
///
/// GET    /{id}/gates            -> gates::list_by_workspace
/// GET    /{id}/products         -> products::list_by_workspace
/// POST   /{id}/products         -> products::create
/// GET    /{id}/listings         -> listings::list_by_workspace
/// POST   /{id}/listings         -> listings::create
/// GET    /{id}/merchant-feed    -> merchant::list_by_workspace
/// GET    /{id}/ai-runs          -> ai_runs::list_by_workspace
/// POST   /{id}/ai-runs/cancel   -> ai_runs::cancel
/// GET    /{id}/tasks            -> tasks::list_by_workspace
/// POST   /{id}/tasks            -> tasks::create
/// GET    /{id}/activities       -> activities::list_by_workspace
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(workspaces::list).post(workspaces::create))
        .route(
            "/{id}",
            get(workspaces::get).delete(workspaces::delete),
        )
        .route("/{id}/gates", get(gates::list_by_workspace))
        .route(
            "/{id}/products",
            get(products::list_by_workspace).post(products::create),
        )
        .route(
            "/{id}/listings",
            get(listings::list_by_workspace).post(listings::create),
        )
        .route("/{id}/merchant-feed", get(merchant::list_by_workspace))
        .route("/{id}/ai-runs", get(ai_runs::list_by_workspace))
        .route("/{id}/ai-runs/cancel", post(ai_runs::cancel))
        .route(
            "/{id}/tasks",
            get(tasks::list_by_workspace).post(tasks::create),
        )
        .route("/{id}/activities", get(activities::list_by_workspace))
}
