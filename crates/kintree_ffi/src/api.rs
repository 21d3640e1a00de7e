//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose family tree computations to Dart via FRB.
//! - Accept the member snapshot as JSON and answer with JSON payloads.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Failures are reported in the response envelope, never as empty payloads
//!   that look like success.

use chrono::NaiveDate;
use kintree_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, parse_snapshot,
    ping as ping_inner, CoreConfig, FamilyTreeService, MemorySnapshot, Person,
};
use log::warn;

const WINDOW_DEFAULT_DAYS: u32 = 30;
const WINDOW_MAX_DAYS: u32 = 366;
const LIST_DEFAULT_LIMIT: u32 = 3;
const LIST_LIMIT_MAX: u32 = 20;

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Response envelope shared by all snapshot-driven calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyResponse {
    /// Whether the computation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// JSON document on success, empty on failure.
    pub payload_json: String,
}

impl FamilyResponse {
    fn success(message: impl Into<String>, payload_json: String) -> Self {
        Self {
            ok: true,
            message: message.into(),
            payload_json,
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
            payload_json: String::new(),
        }
    }
}

/// Resolves generation bands for a member snapshot.
///
/// Payload: the tree layout (`mode`, `anchor_id`, `levels`, `generations`, `stats`).
///
/// # FFI contract
/// - Sync call, pure computation.
/// - `today`: `YYYY-MM-DD`, or `None` for the local date.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn resolve_tree_json(snapshot_json: String, today: Option<String>) -> FamilyResponse {
    respond("resolve_tree_json", || {
        let today = resolve_today(today.as_deref())?;
        let service = service_for(&snapshot_json, CoreConfig::default())?;
        let layout = service.tree(today).map_err(|err| err.to_string())?;
        let message = format!(
            "Resolved {} generation(s) for {} member(s).",
            layout.stats.total_generations, layout.stats.total_members
        );
        Ok((message, to_json(&layout)?))
    })
}

/// Looks up one member's relatives and detail fields.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - Unknown `member_id` is a failure envelope, not an empty payload.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn member_relatives_json(
    snapshot_json: String,
    member_id: String,
    today: Option<String>,
) -> FamilyResponse {
    respond("member_relatives_json", || {
        let today = resolve_today(today.as_deref())?;
        let member_id = member_id.trim();
        let service = service_for(&snapshot_json, CoreConfig::default())?;
        let detail = service
            .member_detail(member_id, today)
            .map_err(|err| err.to_string())?
            .ok_or_else(|| format!("member `{member_id}` not found"))?;
        Ok(("Member found.".to_string(), to_json(&detail)?))
    })
}

/// Builds the home dashboard: stat counters, upcoming birthdays, recent members.
///
/// Payload: `{ "summary": {...}, "calendar": {...}, "upcoming": [...], "recent": [...] }`.
///
/// # FFI contract
/// - Sync call, pure computation.
/// - `window_days` and `limit` are clamped; see `normalize_window_days` and
///   `normalize_list_limit`.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary_json(
    snapshot_json: String,
    today: Option<String>,
    window_days: Option<u32>,
    limit: Option<u32>,
) -> FamilyResponse {
    respond("dashboard_summary_json", || {
        let today = resolve_today(today.as_deref())?;
        let limit = normalize_list_limit(limit) as usize;
        let config = CoreConfig {
            upcoming_window_days: normalize_window_days(window_days),
            upcoming_limit: limit,
            recent_limit: limit,
            ..CoreConfig::default()
        };
        let service = service_for(&snapshot_json, config)?;
        let summary = service.dashboard(today).map_err(|err| err.to_string())?;
        let calendar = service
            .calendar_stats(today)
            .map_err(|err| err.to_string())?;
        let upcoming = service
            .upcoming_birthdays(today)
            .map_err(|err| err.to_string())?;
        let recent = service.recently_added().map_err(|err| err.to_string())?;

        let payload = serde_json::json!({
            "summary": summary,
            "calendar": calendar,
            "upcoming": upcoming,
            "recent": recent.iter().map(recent_entry).collect::<Vec<_>>(),
        });
        let message = format!(
            "{} member(s), {} upcoming birthday(s).",
            summary.total_members, summary.upcoming_birthdays
        );
        Ok((message, to_json(&payload)?))
    })
}

fn respond(
    call: &str,
    f: impl FnOnce() -> Result<(String, String), String>,
) -> FamilyResponse {
    match f() {
        Ok((message, payload_json)) => FamilyResponse::success(message, payload_json),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call={call}");
            FamilyResponse::failure(format!("{call} failed: {err}"))
        }
    }
}

fn service_for(
    snapshot_json: &str,
    config: CoreConfig,
) -> Result<FamilyTreeService<MemorySnapshot>, String> {
    let people = parse_snapshot(snapshot_json).map_err(|err| err.to_string())?;
    Ok(FamilyTreeService::with_config(
        MemorySnapshot::new(people),
        config,
    ))
}

fn resolve_today(raw: Option<&str>) -> Result<NaiveDate, String> {
    match raw.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|err| format!("today must be YYYY-MM-DD: {err}")),
        None => Ok(kintree_core::dates::today()),
    }
}

fn normalize_window_days(window_days: Option<u32>) -> u32 {
    match window_days {
        Some(0) | None => WINDOW_DEFAULT_DAYS,
        Some(value) => value.min(WINDOW_MAX_DAYS),
    }
}

fn normalize_list_limit(limit: Option<u32>) -> u32 {
    match limit {
        Some(0) | None => LIST_DEFAULT_LIMIT,
        Some(value) => value.min(LIST_LIMIT_MAX),
    }
}

fn recent_entry(person: &Person) -> serde_json::Value {
    serde_json::json!({
        "id": person.id,
        "name": person.display_name(),
        "relationship": person.relationship_display(),
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|err| format!("payload encoding failed: {err}"))
}
