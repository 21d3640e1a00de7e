//! Family member domain model.
//!
//! # Responsibility
//! - Define the read-only person record consumed by tree resolution.
//! - Normalize heterogeneous wire shapes at the deserialization boundary.
//!
//! # Invariants
//! - Every person is identified by an opaque, stable `PersonId`.
//! - The core never mutates person records; each computation reads a snapshot.

pub mod person;
