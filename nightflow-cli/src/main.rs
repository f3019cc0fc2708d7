//! NightFlow CLI: foreign night-futures flows against next-day outcomes.
//!
//! Commands:
//! - `report`: comparison tables, co-movement probabilities and correlation
//!   for a date range, as text, HTML or JSON
//! - `inspect`: what ingestion did to a source file (encoding, skipped and
//!   dropped rows, date bounds)

mod render;
mod report;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nightflow_core::config::IngestConfig;
use nightflow_core::data::normalize::COLUMN_NAMES;
use nightflow_core::data::{Ingestor, SeriesCache, Source};
use render::{render, OutputFormat};
use report::{resolve_range, Report};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nightflow",
    about = "NightFlow CLI: foreign night-futures flows vs next-day regular session"
)]
struct Cli {
    /// Log level used when RUST_LOG is unset (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the comparison tables and probability statements.
    Report {
        /// Source CSV file.
        #[arg(long)]
        input: PathBuf,

        /// First date to include (YYYY-MM-DD). Defaults to the series start.
        #[arg(long)]
        start: Option<String>,

        /// Last date to include (YYYY-MM-DD). Defaults to the series end.
        #[arg(long)]
        end: Option<String>,

        /// Ingestion settings as TOML. Defaults apply when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Maximum rows shown per table. Metrics always use the full range.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show ingestion diagnostics for a source file.
    Inspect {
        /// Source CSV file.
        #[arg(long)]
        input: PathBuf,

        /// Ingestion settings as TOML.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Report {
            input,
            start,
            end,
            config,
            format,
            output,
            limit,
        } => run_report(
            &input,
            start.as_deref(),
            end.as_deref(),
            config.as_deref(),
            format,
            output.as_deref(),
            limit,
        ),
        Commands::Inspect { input, config } => run_inspect(&input, config.as_deref()),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_ingestor(config: Option<&Path>) -> Result<Ingestor> {
    let config = match config {
        Some(path) => IngestConfig::from_file(path)?,
        None => IngestConfig::default(),
    };
    Ok(Ingestor::new(config))
}

fn parse_date_arg(flag: &str, value: Option<&str>) -> Result<Option<NaiveDate>> {
    value
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .with_context(|| format!("invalid {flag} '{s}' (expected YYYY-MM-DD)"))
        })
        .transpose()
}

fn run_report(
    input: &Path,
    start: Option<&str>,
    end: Option<&str>,
    config: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    limit: Option<usize>,
) -> Result<()> {
    let start = parse_date_arg("--start", start)?;
    let end = parse_date_arg("--end", end)?;
    let ingestor = load_ingestor(config)?;

    let mut cache = SeriesCache::new();
    let series = cache.get_or_load(&Source::file(input), &ingestor)?;

    let range = resolve_range(series.full_range(), start, end);
    match range {
        Some(r) if r.is_empty() => tracing::warn!(range = %r, "requested range is empty"),
        None => tracing::warn!("series has no next-day records"),
        _ => {}
    }

    let report = Report::build(&series, range, limit);
    let rendered = render(&report, format)?;

    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn run_inspect(input: &Path, config: Option<&Path>) -> Result<()> {
    let ingestor = load_ingestor(config)?;
    let series = ingestor.load(&Source::file(input))?;
    let report = series.report();

    println!("Source:          {}", series.source_label());
    println!("Hash:            {}", series.source_hash());
    println!("Encoding:        {}", report.encoding);
    println!(
        "Columns:         {} (first {} read as {})",
        report.columns,
        COLUMN_NAMES.len(),
        COLUMN_NAMES.join(", ")
    );
    println!("Leading skipped: {}", report.leading_rows_skipped);
    println!("Rows read:       {}", report.rows_read);
    println!("  empty date:    {}", report.dropped_empty_date);
    println!("  bad date:      {}", report.dropped_bad_date);
    println!("  incomplete:    {}", report.dropped_incomplete);
    println!("  duplicates:    {}", report.duplicate_dates);
    println!("Complete rows:   {}", report.rows_complete);
    println!("Records:         {}", report.records);
    match series.full_range() {
        Some(range) => println!("Date range:      {range}"),
        None => println!("Date range:      (none)"),
    }
    Ok(())
}
