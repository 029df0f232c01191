//! CLI entry point for the listing statistics tool.
//!
//! Loads a job-listing CSV, cleans the company size and revenue columns,
//! prints descriptive statistics for one column and writes three charts.

use anyhow::{Context, Result, bail};
use clap::Parser;
use listing_stats::output::{render_json, render_report};
use listing_stats::pipeline::{RunConfig, analyze, render_charts};
use listing_stats::plots::PlotConfig;
use listing_stats::preprocess::Column;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "listing_stats")]
#[command(about = "Clean a job-listing CSV, chart it and summarize one column", long_about = None)]
struct Cli {
    /// CSV file to analyze
    #[arg(short, long, default_value = "data.csv")]
    input: PathBuf,

    /// Numeric column to summarize (company_size or revenue)
    #[arg(short, long, default_value = "revenue")]
    column: Column,

    /// Directory the chart images are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Field delimiter of the input file
    #[arg(short, long, default_value_t = ',')]
    delimiter: char,

    /// Fail when fewer rows than this survive cleaning
    #[arg(long, default_value_t = 1)]
    min_rows: usize,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 960)]
    height: u32,

    /// Skip chart rendering
    #[arg(long, default_value_t = false)]
    no_plots: bool,

    /// Print the full report as JSON instead of text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl Cli {
    fn into_config(self) -> Result<RunConfig> {
        if !self.delimiter.is_ascii() {
            bail!("Delimiter must be a single ASCII character, got '{}'", self.delimiter);
        }

        Ok(RunConfig {
            input: self.input,
            column: self.column,
            output_dir: self.output_dir,
            delimiter: self.delimiter as u8,
            min_rows: self.min_rows,
            plots: (!self.no_plots).then_some(PlotConfig {
                width: self.width,
                height: self.height,
            }),
        })
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let _log_guard = init_tracing()?;

    let cli = Cli::parse();
    let json = cli.json;
    let config = cli.into_config()?;

    let analysis = analyze(&config)?;

    // Statistics are printed before any chart can fail.
    if !json {
        print!(
            "{}",
            render_report(&analysis.report.moments, analysis.report.column)
        );
    }

    let charts = render_charts(&analysis.cleaned, &config);
    if let Err(err) = &charts {
        error!(error = %err, "Chart rendering failed");
    }

    if json {
        let plots = charts.as_ref().cloned().unwrap_or_default();
        println!("{}", render_json(&analysis.report.with_plots(plots))?);
    }

    charts.map(|_| ())
}

/// Logging setup: colored stderr + JSON rolling log file.
///
/// The returned guard flushes the file writer when dropped.
fn init_tracing() -> Result<WorkerGuard> {
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/listing_stats.log".to_string());
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender(&log_file_path)?);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    Ok(guard)
}

/// Daily-rolling appender for `log_file_path`, creating its directory.
fn file_appender(log_file_path: &str) -> Result<RollingFileAppender> {
    let log_dir = Path::new(log_file_path)
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("listing_stats.log"));

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name.to_string_lossy())
        .build(log_dir)
        .with_context(|| format!("Cannot open log file '{log_file_path}'"))
}
