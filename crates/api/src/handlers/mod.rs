//! HTTP handlers, one module per resource.

pub mod activities;
pub mod ai_runs;
pub mod gates;
pub mod listings;
pub mod media_sets;
pub mod merchant;
pub mod products;
pub mod tasks;
pub mod workspaces;

use launchos_core::types::DbId;
use launchos_db::models::activity::CreateActivity;
use launchos_db::repositories::activity_repo::ActivityRepo;

use crate::middleware::auth::AuthUser;

/// Record an activity feed entry. Feed failures are logged, never
/// surfaced: the main operation has already committed.
pub(crate) async fn record_activity(
    pool: &launchos_db::DbPool,
    workspace_id: DbId,
    user: &AuthUser,
    action: &str,
    entity_type: &str,
    entity_id: Option<DbId>,
    detail: Option<serde_json::Value>,
) {
    let input = CreateActivity {
        actor: format!("user:{}", user.user_id),
        action: action.to_string(),
        entity_type: entity_type.to_string(),
        entity_id,
        detail,
    };
    if let Err(e) = ActivityRepo::create(pool, workspace_id, &input).await {
        tracing::warn!(error = %e, action, "Failed to record activity");
    }
}
