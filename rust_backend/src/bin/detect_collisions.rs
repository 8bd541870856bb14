//! Collision detection command-line tool.
//!
//! Reads a timetable CSV, reports every teacher or room double-booking and
//! writes an annotated copy of the timetable.
//!
//! # Usage
//!
//! ```bash
//! detect-collisions timetable.csv
//! detect-collisions timetable.csv -o checked.csv --policy per-key --report json
//! RUST_LOG=debug detect-collisions timetable.csv
//! ```
//!
//! Settings are taken from `--config`, or from `collisions.toml` in the
//! default locations. Command-line flags override the file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use class_collisions::algorithms::CollisionPolicy;
use class_collisions::config::{DetectorConfig, ReportFormat};
use class_collisions::preprocessing::CollisionPipeline;
use class_collisions::services::{render_report, CollisionSummary};

/// Command-line arguments for detect-collisions
#[derive(Parser, Debug)]
#[command(name = "detect-collisions")]
#[command(about = "Find teacher and room double-bookings in a class timetable")]
#[command(version)]
struct Args {
    /// Timetable CSV to check
    input: PathBuf,

    /// Where to write the annotated timetable (default: <input>_with_collisions.csv)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE", env = "COLLISIONS_CONFIG")]
    config: Option<PathBuf>,

    /// How pairs sharing both teacher and room are reported: merged or per-key
    #[arg(long)]
    policy: Option<CollisionPolicy>,

    /// Report printed on stdout: text, json or none
    #[arg(long)]
    report: Option<ReportFormat>,
}

fn load_config(args: &Args) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?,
        None => DetectorConfig::from_default_location()
            .context("Failed to load default configuration")?
            .unwrap_or_default(),
    };

    if let Some(policy) = args.policy {
        config.detection.policy = policy;
    }
    if let Some(report) = args.report {
        config.output.report = report;
    }

    Ok(config)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let report = config.output.report;
    info!(
        "Checking {} with policy {}",
        args.input.display(),
        config.detection.policy
    );

    let pipeline = CollisionPipeline::with_config(config);
    let outcome = pipeline.process(&args.input, args.output.as_deref())?;

    match report {
        ReportFormat::Text => print!("{}", render_report(&outcome.records, &outcome.collisions)),
        ReportFormat::Json => {
            let summary = CollisionSummary::from_run(&outcome.records, &outcome.collisions);
            println!("{}", summary.to_json().context("Failed to serialize summary")?);
        }
        ReportFormat::None => {}
    }

    Ok(())
}
