//! Route definitions for the `/tasks` resource (war-room board).

use axum::routing::get;
use axum::Router;

use crate::handlers::tasks;
use crate::state::AppState;

/// Routes mounted at `/tasks`.
///
/// ```text
/// GET    /{id}  -> get
/// PATCH  /{id}  -> update (owning role or admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}",
        get(tasks::get).patch(tasks::update).delete(tasks::delete),
    )
}
