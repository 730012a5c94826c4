use std::sync::Arc;

use crate::config::ServerConfig;
use crate::runs::RunManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: launchos_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// In-flight AI pipeline run tracker.
    pub runs: Arc<RunManager>,
}
