//! The end-to-end run: load, clean, analyze, report, then chart.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::loader::load_table;
use crate::output::{Report, print_pretty};
use crate::plots::{PlotConfig, render_all};
use crate::preprocess::{CleanedTable, Column, preprocess};
use crate::stats::statistical_analysis;

/// Settings for one run. The defaults analyze `revenue` in `data.csv`.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub column: Column,
    pub output_dir: PathBuf,
    pub delimiter: u8,
    pub min_rows: usize,
    pub plots: Option<PlotConfig>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data.csv"),
            column: Column::Revenue,
            output_dir: PathBuf::from("."),
            delimiter: b',',
            min_rows: 1,
            plots: Some(PlotConfig::default()),
        }
    }
}

/// Cleaned rows and the statistics computed from them.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub cleaned: CleanedTable,
    pub report: Report,
}

/// Loads, cleans and summarizes the input without touching any chart.
///
/// # Errors
///
/// Fails when the input cannot be read or parsed, a required column is
/// missing, or too few rows survive cleaning.
#[tracing::instrument(skip(config), fields(input = %config.input.display(), column = %config.column))]
pub fn analyze(config: &RunConfig) -> Result<Analysis> {
    let raw = load_table(&config.input, config.delimiter)?;
    let cleaned = preprocess(&raw, config.min_rows)
        .with_context(|| format!("Cannot analyze '{}'", config.input.display()))?;

    let moments = statistical_analysis(&cleaned, config.column);
    let report = Report::new(&cleaned, config.column, moments);

    info!(
        mean = report.moments.mean,
        stddev = report.moments.stddev,
        correlation = report.correlation,
        "Analysis complete"
    );
    print_pretty(&report);

    Ok(Analysis { cleaned, report })
}

/// Writes the three charts for an analyzed table, unless charts are disabled.
///
/// # Errors
///
/// Fails when the output directory cannot be created or a chart cannot be
/// rendered.
#[tracing::instrument(skip(cleaned, config), fields(out_dir = %config.output_dir.display()))]
pub fn render_charts(cleaned: &CleanedTable, config: &RunConfig) -> Result<Vec<PathBuf>> {
    let Some(plot_config) = &config.plots else {
        info!("Chart rendering disabled");
        return Ok(Vec::new());
    };

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory '{}'",
            config.output_dir.display()
        )
    })?;
    Ok(render_all(cleaned, &config.output_dir, plot_config)?)
}

/// Runs the whole pipeline and returns the report with the written charts.
///
/// # Errors
///
/// Everything [`analyze`] and [`render_charts`] can fail with.
pub fn run(config: &RunConfig) -> Result<Report> {
    let analysis = analyze(config)?;
    let plots = render_charts(&analysis.cleaned, config)?;
    Ok(analysis.report.with_plots(plots))
}
