//! vigil record verifier demo CLI
//!
//! Runs the daily rule set over event and appointment exports, prints the
//! verification report and writes it (and optionally one CSV per broken rule)
//! to the output directory.
//!
//! Usage:
//!   cargo run -p demo -- daily
//!   cargo run -p demo -- daily --events events.json --appointments appts.json --export-errors
//!   cargo run -p demo -- list-rules

use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{Local, NaiveDateTime};
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vigil_contracts::{
    error::{VigilError, VigilResult},
    result::VerificationResult,
};
use vigil_ref_events::{
    config::VigilConfig,
    mock_data,
    records::{records_from_file, Appointment, Event},
    rule_sets::{daily::report_file_name, RuleCatalog},
    daily_verification,
};
use vigil_report::{export_default, render, render_csv};

const NOW_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── CLI definition ────────────────────────────────────────────────────────────

/// vigil: rule verification over career office exports.
#[derive(Parser)]
#[command(
    name = "vigil-demo",
    about = "Verify event and appointment exports against business rules",
    long_about = "Runs the daily rule set over event and appointment exports and writes\n\
                  a plain-text verification report. Without record files the built-in\n\
                  mock exports are used."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the daily rule set and write its report.
    Daily(DailyArgs),
    /// Print the name and description of every reference rule.
    ListRules {
        /// TOML configuration file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct DailyArgs {
    /// JSON array of event records.
    #[arg(long)]
    events: Option<PathBuf>,

    /// JSON array of appointment records.
    #[arg(long)]
    appointments: Option<PathBuf>,

    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the report and exports (overrides `output.dir`).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Reference time, "YYYY-MM-DD HH:MM:SS".
    #[arg(long)]
    now: Option<String>,

    /// Also write one CSV of violations per broken rule.
    #[arg(long)]
    export_errors: bool,

    /// Evaluate rules concurrently.
    #[arg(long)]
    parallel: bool,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for per-rule output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Daily(args) => run_daily(args),
        Command::ListRules { config } => list_rules(config.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("vigil error: {}", e);
        std::process::exit(1);
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_daily(args: DailyArgs) -> VigilResult<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dir) = args.out_dir {
        config.output.dir = dir;
    }
    config.output.export_errors |= args.export_errors;
    config.runner.parallel |= args.parallel;

    let use_mock = args.events.is_none() && args.appointments.is_none();
    let (events, appointments): (Vec<Event>, Vec<Appointment>) = if use_mock {
        info!("no record files given; using mock exports");
        (mock_data::events()?, mock_data::appointments()?)
    } else {
        (
            load_records(args.events.as_deref())?,
            load_records(args.appointments.as_deref())?,
        )
    };

    let now = match args.now.as_deref() {
        Some(s) => parse_now(s)?,
        None if use_mock => mock_data::mock_now()?,
        None => Local::now().naive_local(),
    };

    let (results, report) = daily_verification(&events, &appointments, now, &config)?;
    let text = render(&report);
    println!("{}", text);

    let report_path = config.output.dir.join(report_file_name(now.date()));
    write_file(&report_path, &text)?;

    if config.output.export_errors {
        let catalog = RuleCatalog::new(&config.rules, now);
        export_broken(&results, &catalog, &config.output.dir, now)?;
    }
    Ok(())
}

fn list_rules(config: Option<&Path>) -> VigilResult<()> {
    let config = load_config(config)?;
    let catalog = RuleCatalog::new(&config.rules, Local::now().naive_local());
    for (name, description) in catalog.describe() {
        println!("{:<28} {}", name, description);
    }
    Ok(())
}

// ── Sources and sinks ─────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> VigilResult<VigilConfig> {
    match path {
        Some(path) => VigilConfig::from_file(path),
        None => Ok(VigilConfig::default()),
    }
}

/// A missing file argument is an empty dataset.
fn load_records<T: DeserializeOwned>(path: Option<&Path>) -> VigilResult<Vec<T>> {
    match path {
        Some(path) => records_from_file(path),
        None => Ok(Vec::new()),
    }
}

fn parse_now(s: &str) -> VigilResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, NOW_FORMAT).map_err(|e| VigilError::ConfigError {
        reason: format!("invalid --now '{}' (expected {}): {}", s, NOW_FORMAT, e),
    })
}

/// Write `<rule-name>_<date>.csv` for every broken result.
fn export_broken(
    results: &[VerificationResult],
    catalog: &RuleCatalog,
    dir: &Path,
    now: NaiveDateTime,
) -> VigilResult<()> {
    for result in results.iter().filter(|r| !r.is_verified()) {
        let name = catalog.name_for(result.rule()).unwrap_or("rule");
        let path = dir.join(format!("{}_{}.csv", name, now.format("%Y-%m-%d")));
        write_file(&path, &render_csv(&export_default(result))?)?;
    }
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> VigilResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| VigilError::Sink {
            reason: format!("failed to create '{}': {}", parent.display(), e),
        })?;
    }
    fs::write(path, contents).map_err(|e| VigilError::Sink {
        reason: format!("failed to write '{}': {}", path.display(), e),
    })?;
    info!(path = %path.display(), bytes = contents.len(), "wrote output file");
    Ok(())
}
