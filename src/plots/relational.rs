use plotters::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::{BILLION, PlotConfig, log_axis_range, series_color};
use crate::error::AnalysisError;
use crate::preprocess::CleanedTable;

const CHART: &str = "relational plot";

/// Scatter of company size against revenue in billions, both axes logarithmic.
///
/// Points with a non-positive coordinate cannot be placed on a log axis and
/// are left out.
#[tracing::instrument(skip(table, config), fields(path = %path.display()))]
pub fn plot_relational_plot(
    table: &CleanedTable,
    path: &Path,
    config: &PlotConfig,
) -> Result<PathBuf, AnalysisError> {
    let err = |e| AnalysisError::render(CHART, e);

    let points: Vec<(f64, f64)> = table
        .records()
        .iter()
        .map(|r| (r.company_size, r.revenue / BILLION))
        .filter(|&(x, y)| x > 0.0 && y > 0.0)
        .collect();

    let skipped = table.len() - points.len();
    if skipped > 0 {
        debug!(skipped, "Points outside the log axes were left out");
    }

    let x_range = log_axis_range(points.iter().map(|p| p.0));
    let y_range = log_axis_range(points.iter().map(|p| p.1));

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Company Size vs Revenue", ("sans-serif", 30))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range.log_scale(), y_range.log_scale())
        .map_err(err)?;

    chart
        .configure_mesh()
        .x_desc("Company Size")
        .y_desc("Revenue (€Billions)")
        .draw()
        .map_err(err)?;

    let color = series_color(0);
    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, color.mix(0.7).filled())),
        )
        .map_err(err)?;

    root.present().map_err(err)?;
    debug!(points = points.len(), "Relational plot written");

    Ok(path.to_path_buf())
}
