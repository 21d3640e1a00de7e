//! JSON-file snapshot source.

use super::{SnapshotError, SnapshotResult, SnapshotSource};
use crate::model::person::Person;
use log::info;
use std::path::{Path, PathBuf};

/// Reads a JSON array of member documents from disk on every call.
#[derive(Debug, Clone)]
pub struct JsonFileSnapshot {
    path: PathBuf,
}

impl JsonFileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for JsonFileSnapshot {
    fn snapshot(&self) -> SnapshotResult<Vec<Person>> {
        let text = std::fs::read_to_string(&self.path).map_err(|source| SnapshotError::Io {
            path: self.path.clone(),
            source,
        })?;
        let people = parse_snapshot(&text)?;
        info!(
            "event=snapshot_load module=snapshot status=ok source=json_file members={}",
            people.len()
        );
        Ok(people)
    }
}

/// Decodes a JSON array of member documents.
pub fn parse_snapshot(text: &str) -> SnapshotResult<Vec<Person>> {
    serde_json::from_str(text).map_err(Into::into)
}
