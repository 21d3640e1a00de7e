//! Member snapshot sources.
//!
//! # Responsibility
//! - Define the seam between the persistence collaborator and the core.
//! - Provide in-memory and JSON-file snapshot implementations.
//!
//! # Invariants
//! - A snapshot is an owned, immutable copy; callers re-read on every change.
//! - Decoding tolerates missing fields; only structurally invalid documents fail.

mod json_file;

pub use json_file::{parse_snapshot, JsonFileSnapshot};

use crate::model::person::Person;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;

/// Result type used by snapshot sources.
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Errors from loading a member snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// Snapshot file cannot be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Snapshot document is not a JSON array of member objects.
    Parse(serde_json::Error),
}

impl Display for SnapshotError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read snapshot `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid member snapshot: {err}"),
        }
    }
}

impl Error for SnapshotError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for SnapshotError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Source of member snapshots.
pub trait SnapshotSource {
    /// Returns the current member set in stable input order.
    fn snapshot(&self) -> SnapshotResult<Vec<Person>>;
}

/// Snapshot held in memory, e.g. pushed by a change listener.
#[derive(Debug, Clone, Default)]
pub struct MemorySnapshot {
    people: Vec<Person>,
}

impl MemorySnapshot {
    pub fn new(people: Vec<Person>) -> Self {
        Self { people }
    }

    /// Replaces the held member set.
    pub fn replace(&mut self, people: Vec<Person>) {
        self.people = people;
    }
}

impl SnapshotSource for MemorySnapshot {
    fn snapshot(&self) -> SnapshotResult<Vec<Person>> {
        Ok(self.people.clone())
    }
}
