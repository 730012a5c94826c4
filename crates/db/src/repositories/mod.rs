//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Reads are scoped by
//! `workspace_id` where the table is workspace-owned.

pub mod activity_repo;
pub mod ai_run_repo;
pub mod gate_repo;
pub mod listing_repo;
pub mod media_set_repo;
pub mod merchant_feed_repo;
pub mod product_repo;
pub mod task_repo;
pub mod workspace_repo;
