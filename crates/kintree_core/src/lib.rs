//! Core domain logic for KinTree.
//! Generation inference, relative lookup and birthday arithmetic over
//! in-memory family member snapshots.

pub mod config;
pub mod dates;
pub mod logging;
pub mod model;
pub mod relation;
pub mod service;
pub mod snapshot;
pub mod tree;

pub use config::{ConfigError, CoreConfig};
pub use dates::DateSource;
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::person::{Person, PersonId};
pub use relation::{Relation, SELF_MARKERS};
pub use service::dashboard::{CalendarStats, DashboardSummary, MonthBirthday, UpcomingBirthday};
pub use service::tree_service::FamilyTreeService;
pub use snapshot::{
    parse_snapshot, JsonFileSnapshot, MemorySnapshot, SnapshotError, SnapshotResult,
    SnapshotSource,
};
pub use tree::{
    generation_title, resolve, resolve_as_of, FamilyIndex, GenerationBand, MemberDetail,
    Relatives, ResolveMode, TreeLayout, TreeStats,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
