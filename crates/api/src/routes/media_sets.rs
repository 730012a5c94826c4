//! Route definitions for the `/media-sets` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::media_sets;
use crate::state::AppState;

/// Routes mounted at `/media-sets`.
///
/// ```text
/// GET   /{id}  -> get
/// PATCH /{id}  -> update (catalogo+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(media_sets::get).patch(media_sets::update))
}
