//! Chart rendering for the cleaned listings.
//!
//! Every chart takes the cleaned table and an explicit destination path and
//! writes a PNG there. Nothing is kept between calls.

mod categorical;
mod relational;
mod statistical;

pub use categorical::plot_categorical_plot;
pub use relational::plot_relational_plot;
pub use statistical::plot_statistical_plot;

use plotters::style::RGBColor;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::AnalysisError;
use crate::preprocess::CleanedTable;

pub const RELATIONAL_PLOT: &str = "relational_plot.png";
pub const STATISTICAL_PLOT: &str = "statistical_plot.png";
pub const CATEGORICAL_PLOT: &str = "categorical_plot.png";

pub(crate) const BILLION: f64 = 1e9;

/// Pixel dimensions shared by all charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlotConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 960,
        }
    }
}

/// Series colors, matching the default matplotlib cycle the charts were
/// first drawn with.
const SERIES_COLORS: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

/// Color of the `index`-th series; wraps around after ten.
pub fn series_color(index: usize) -> RGBColor {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

/// Axis range covering the positive values, padded for a log scale.
///
/// Falls back to `1..10` when no value is positive.
pub fn log_axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite() && *v > 0.0)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return 1.0..10.0;
    }
    if lo == hi {
        return lo / 10.0..hi * 10.0;
    }
    lo / 1.5..hi * 1.5
}

/// Axis range covering all values with a 5 % margin on either side.
pub fn linear_axis_range(values: impl IntoIterator<Item = f64>) -> Range<f64> {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if !lo.is_finite() {
        return 0.0..1.0;
    }
    let pad = ((hi - lo) * 0.05).max(0.5);
    lo - pad..hi + pad
}

/// Renders the three charts into `out_dir` and returns the written paths.
#[tracing::instrument(skip(table, config), fields(out_dir = %out_dir.display()))]
pub fn render_all(
    table: &CleanedTable,
    out_dir: &Path,
    config: &PlotConfig,
) -> Result<Vec<PathBuf>, AnalysisError> {
    let written = vec![
        plot_relational_plot(table, &out_dir.join(RELATIONAL_PLOT), config)?,
        plot_statistical_plot(table, &out_dir.join(STATISTICAL_PLOT), config)?,
        plot_categorical_plot(table, &out_dir.join(CATEGORICAL_PLOT), config)?,
    ];
    info!(charts = written.len(), "Charts written");
    Ok(written)
}
