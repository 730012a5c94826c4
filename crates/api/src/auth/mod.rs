//! Authentication building blocks.

pub mod jwt;
