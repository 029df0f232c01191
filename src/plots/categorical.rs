use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{PlotConfig, series_color};
use crate::error::AnalysisError;
use crate::preprocess::CleanedTable;

const CHART: &str = "categorical plot";

/// Pie chart of how often each seniority level occurs, with percentages.
#[tracing::instrument(skip(table, config), fields(path = %path.display()))]
pub fn plot_categorical_plot(
    table: &CleanedTable,
    path: &Path,
    config: &PlotConfig,
) -> Result<PathBuf, AnalysisError> {
    let err = |e| AnalysisError::render(CHART, e);

    let counts = table.seniority_counts();
    let sizes: Vec<f64> = counts.iter().map(|(_, n)| *n as f64).collect();
    let labels: Vec<&str> = counts.iter().map(|(level, _)| level.as_str()).collect();
    let colors: Vec<RGBColor> = (0..counts.len()).map(series_color).collect();

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(err)?;
    let area = root
        .titled("Seniority Distribution in Job Listings", ("sans-serif", 30))
        .map_err(err)?;

    if !sizes.is_empty() {
        let (width, height) = area.dim_in_pixel();
        let center = (width as i32 / 2, height as i32 / 2);
        let radius = f64::from(width.min(height)) * 0.35;

        let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
        pie.label_style(("sans-serif", 22).into_font().color(&BLACK));
        pie.percentages(("sans-serif", radius * 0.08).into_font().color(&BLACK));
        area.draw(&pie).map_err(err)?;
    }

    root.present().map_err(err)?;
    debug!(categories = counts.len(), "Categorical plot written");

    Ok(path.to_path_buf())
}
