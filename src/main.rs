//! Drought Index CLI
//!
//! Prices consecutive-dry-day triggers against a daily precipitation CSV

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use log::info;

use drought_index::config::{parse_months, parse_thresholds};
use drought_index::series::{load_series, DateWindow};
use drought_index::{AnalysisRunner, ReportFormatter, ThresholdConfig};

#[derive(Debug, Parser)]
#[command(name = "drought_index", version, about = "Consecutive dry-day index insurance pricing")]
struct Args {
    /// Daily series CSV with columns date,precipitation_mm
    #[arg(long)]
    series: PathBuf,

    /// JSON config file; individual flags below override its fields
    #[arg(long)]
    config: Option<PathBuf>,

    /// Dry-day cutoff in mm (a day is dry when precipitation <= this)
    #[arg(long)]
    dry_mm: Option<f64>,

    /// Comma-separated consecutive-day thresholds, e.g. "10,15,20"
    #[arg(long)]
    thresholds: Option<String>,

    /// Comma-separated season months, numbers or names, e.g. "10,11,12,1,2,3"
    #[arg(long)]
    months: Option<String>,

    /// Sum insured paid in a triggered year
    #[arg(long)]
    sum_insured: Option<f64>,

    /// First date to load (YYYY-MM-DD)
    #[arg(long)]
    start: Option<NaiveDate>,

    /// Last date to load (YYYY-MM-DD)
    #[arg(long)]
    end: Option<NaiveDate>,

    /// Print the full outcome as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Leave out the per-year dry-spell table
    #[arg(long)]
    no_year_table: bool,
}

fn build_config(args: &Args) -> Result<ThresholdConfig> {
    let mut config = match &args.config {
        Some(path) => ThresholdConfig::from_json_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => ThresholdConfig::default(),
    };

    if let Some(dry_mm) = args.dry_mm {
        config.dry_day_threshold_mm = dry_mm;
    }
    if let Some(thresholds) = &args.thresholds {
        config.consecutive_day_thresholds = parse_thresholds(thresholds).context("parsing --thresholds")?;
    }
    if let Some(months) = &args.months {
        config.season_months = parse_months(months).context("parsing --months")?;
    }
    if let Some(sum_insured) = args.sum_insured {
        config.sum_insured = sum_insured;
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let config = build_config(&args)?;

    let window = DateWindow { start: args.start, end: args.end };
    let series = load_series(&args.series, window)
        .with_context(|| format!("loading series {}", args.series.display()))?;
    info!("loaded {} daily records from {}", series.len(), args.series.display());

    let runner = AnalysisRunner::new(series);
    let outcome = runner.run(&config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        let formatter = ReportFormatter { year_table: !args.no_year_table };
        print!("{}", formatter.format_outcome(&outcome));
    }

    Ok(())
}
