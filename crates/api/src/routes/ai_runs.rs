//! Route definitions for the `/ai-runs` resource.
//!
//! Starting a run lives under `/products/{id}/ai-runs`; cancel lives
//! under `/workspaces/{id}/ai-runs/cancel`. Only the by-id read is
//! mounted here.

use axum::routing::get;
use axum::Router;

use crate::handlers::ai_runs;
use crate::state::AppState;

/// Routes mounted at `/ai-runs`.
///
/// ```text
/// GET /{id}  -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/{id}", get(ai_runs::get))
}
