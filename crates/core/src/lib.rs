//! Pure domain logic for the marketplace launch backend.
//!
//! This crate contains no database or network dependencies. All state
//! transitions and scoring rules are pure functions evaluated against
//! data pre-loaded by the caller; persistence and authorization are the
//! responsibility of the `launchos-db` and `launchos-api` crates.

pub mod catalog;
pub mod error;
pub mod evidence;
pub mod gate;
pub mod listing;
pub mod marketplace;
pub mod media;
pub mod merchant;
pub mod roles;
pub mod task;
pub mod types;
