//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod activity;
pub mod ai_run;
pub mod gate;
pub mod listing;
pub mod media;
pub mod merchant;
pub mod product;
pub mod task;
pub mod workspace;
