//! Route definitions for the `/listings` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// Routes mounted at `/listings`.
///
/// ```text
/// GET    /{id}          -> get
/// PUT    /{id}          -> save (recomputes readiness, catalogo+)
/// DELETE /{id}          -> delete (catalogo+)
/// POST   /{id}/publish  -> publish (catalogo+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(listings::get)
                .put(listings::save)
                .delete(listings::delete),
        )
        .route("/{id}/publish", post(listings::publish))
}
