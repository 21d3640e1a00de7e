//! Command-line probe over a member snapshot file.
//!
//! # Responsibility
//! - Run core computations against a JSON snapshot without the Flutter host.
//! - Print results as pretty JSON on stdout; errors go to stderr with exit code 1.

use chrono::NaiveDate;
use clap::Parser;
use kintree_core::{init_logging_from_config, CoreConfig, FamilyTreeService, JsonFileSnapshot};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

/// Family tree generation and dashboard probe.
#[derive(Parser, Debug)]
#[command(name = "kintree")]
#[command(version)]
#[command(about = "Resolve family tree generations from a member snapshot")]
struct Cli {
    /// JSON array of member documents.
    snapshot: PathBuf,

    /// Core config file (JSON).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the detail view for one member instead of the tree.
    #[arg(long, conflicts_with = "dashboard")]
    member: Option<String>,

    /// Print dashboard counters, upcoming birthdays and recent members.
    #[arg(long)]
    dashboard: bool,

    /// Reference date (YYYY-MM-DD); defaults to the local date.
    #[arg(long, value_parser = parse_today)]
    today: Option<NaiveDate>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("kintree: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<String, Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => CoreConfig::load(path)?,
        None => CoreConfig::default(),
    };
    init_logging_from_config(&config)?;

    let today = cli.today.unwrap_or_else(kintree_core::dates::today);
    let service = FamilyTreeService::with_config(JsonFileSnapshot::new(&cli.snapshot), config);

    let output = if let Some(member) = cli.member.as_deref() {
        let detail = service
            .member_detail(member, today)?
            .ok_or_else(|| format!("member `{member}` not found"))?;
        serde_json::to_string_pretty(&detail)?
    } else if cli.dashboard {
        let dashboard = serde_json::json!({
            "summary": service.dashboard(today)?,
            "calendar": service.calendar_stats(today)?,
            "upcoming": service.upcoming_birthdays(today)?,
            "recent": service.recently_added()?,
        });
        serde_json::to_string_pretty(&dashboard)?
    } else {
        serde_json::to_string_pretty(&service.tree(today)?)?
    };
    Ok(output)
}

fn parse_today(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}
