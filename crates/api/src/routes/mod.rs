pub mod ai_runs;
pub mod gates;
pub mod health;
pub mod listings;
pub mod media_sets;
pub mod merchant;
pub mod products;
pub mod tasks;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /workspaces                            list, create (seeds gates)
/// /workspaces/{id}                       get, delete
/// /workspaces/{id}/gates                 gate runs, sorted (marketplace, order)
/// /workspaces/{id}/products              list, create
/// /workspaces/{id}/listings              list, create
/// /workspaces/{id}/merchant-feed         feed rows
/// /workspaces/{id}/ai-runs               run history
/// /workspaces/{id}/ai-runs/cancel        cancel active run (POST)
/// /workspaces/{id}/tasks                 war-room board, create
/// /workspaces/{id}/activities            activity feed (?limit)
///
/// /gates/{id}                            get
/// /gates/{id}/checks                     toggle checklist item (PATCH)
/// /gates/{id}/evidence                   attach evidence (POST)
/// /gates/{id}/submit                     submit for review (POST)
/// /gates/{id}/approve                    approve, unlocks successor (POST)
/// /gates/{id}/reject                     reject with reason (POST)
/// /gates/{id}/reopen                     rejected -> in_progress (POST)
///
/// /products/{id}                         get, update, delete
/// /products/{id}/media-set               get-or-create media set
/// /products/{id}/listings                drafts for the product
/// /products/{id}/merchant-feed           upsert feed row (PUT)
/// /products/{id}/ai-runs                 start pipeline run (POST)
///
/// /media-sets/{id}                       get, update
///
/// /listings/{id}                         get, save (PUT), delete
/// /listings/{id}/publish                 publish, terminal (POST)
///
/// /merchant-feed/{id}                    get
/// /merchant-feed/{id}/validate           run field checks (POST)
///
/// /ai-runs/{id}                          get
///
/// /tasks/{id}                            get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/workspaces", workspaces::router())
        .nest("/gates", gates::router())
        .nest("/products", products::router())
        .nest("/media-sets", media_sets::router())
        .nest("/listings", listings::router())
        .nest("/merchant-feed", merchant::router())
        .nest("/ai-runs", ai_runs::router())
        .nest("/tasks", tasks::router())
}
