//! War task entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use launchos_core::types::{DbId, Timestamp};

/// A row from the `war_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WarTask {
    pub id: DbId,
    pub workspace_id: DbId,
    pub marketplace_key: String,
    pub task_type: String,
    pub title: String,
    pub priority: i32,
    pub impact: i32,
    pub owner_role: String,
    pub status: String,
    pub notes: Option<String>,
    /// Free-form outcome note filled when the task completes.
    pub result: Option<String>,
    pub task_date: NaiveDate,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a war task. Status always starts `todo`.
#[derive(Debug, Deserialize)]
pub struct CreateWarTask {
    pub marketplace_key: String,
    pub task_type: String,
    pub title: String,
    pub priority: i32,
    pub impact: i32,
    pub owner_role: String,
    pub notes: Option<String>,
}

/// DTO for partially updating a war task.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateWarTask {
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub impact: Option<i32>,
    pub notes: Option<String>,
    pub result: Option<String>,
}
