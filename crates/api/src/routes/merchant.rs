//! Route definitions for the `/merchant-feed` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::merchant;
use crate::state::AppState;

/// Routes mounted at `/merchant-feed`.
///
/// ```text
/// GET  /{id}           -> get
/// POST /{id}/validate  -> validate (catalogo+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(merchant::get))
        .route("/{id}/validate", post(merchant::validate))
}
