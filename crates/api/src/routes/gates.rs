//! Route definitions for the `/gates` resource.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::gates;
use crate::state::AppState;

/// Routes mounted at `/gates`.
///
/// ```text
/// GET   /{id}           -> get
/// PATCH /{id}/checks    -> patch_checks (cadastro+)
/// POST  /{id}/evidence  -> attach_evidence (cadastro+)
/// POST  /{id}/submit    -> submit (cadastro+)
/// POST  /{id}/approve   -> approve (auditor+)
/// POST  /{id}/reject    -> reject (auditor+)
/// POST  /{id}/reopen    -> reopen (cadastro+)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(gates::get))
        .route("/{id}/checks", patch(gates::patch_checks))
        .route("/{id}/evidence", post(gates::attach_evidence))
        .route("/{id}/submit", post(gates::submit))
        .route("/{id}/approve", post(gates::approve))
        .route("/{id}/reject", post(gates::reject))
        .route("/{id}/reopen", post(gates::reopen))
}
