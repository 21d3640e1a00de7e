//! Use-case services consumed by UI surfaces.
//!
//! # Responsibility
//! - Compose snapshot loading, tree resolution and dashboard queries.
//! - Keep callers independent of how snapshots are produced.

pub mod dashboard;
pub mod tree_service;
