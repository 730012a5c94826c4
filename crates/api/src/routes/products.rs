//! Route definitions for the `/products` resource.
//!
//! Product-scoped sub-resources (the media set, listing drafts, the
//! merchant feed row and AI runs) are mounted here.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{ai_runs, listings, media_sets, merchant, products};
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /{id}                -> get
/// PATCH  /{id}                -> update (catalogo+)
/// DELETE /{id}                -> delete (catalogo+)
///
/// GET    /{id}/media-set      -> media_sets::get_for_product (creates on first access)
/// GET    /{id}/listings       -> listings::list_by_product
/// PUT    /{id}/merchant-feed  -> merchant::upsert (catalogo+)
/// POST   /{id}/ai-runs        -> ai_runs::start (catalogo+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/{id}",
            get(products::get)
                .patch(products::update)
                .delete(products::delete),
        )
        .route("/{id}/media-set", get(media_sets::get_for_product))
        .route("/{id}/listings", get(listings::list_by_product))
        .route("/{id}/merchant-feed", put(merchant::upsert))
        .route("/{id}/ai-runs", post(ai_runs::start))
}
