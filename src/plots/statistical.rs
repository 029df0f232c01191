use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

use super::{BILLION, PlotConfig, linear_axis_range, log_axis_range, series_color};
use crate::error::AnalysisError;
use crate::preprocess::{CleanedTable, Column};

const CHART: &str = "statistical plot";

/// Company sizes are shown in units of 100,000 employees.
const SIZE_SCALE: f64 = 100_000.0;

/// Two side-by-side box plots: scaled company size and revenue in billions
/// on a logarithmic axis.
#[tracing::instrument(skip(table, config), fields(path = %path.display()))]
pub fn plot_statistical_plot(
    table: &CleanedTable,
    path: &Path,
    config: &PlotConfig,
) -> Result<PathBuf, AnalysisError> {
    let err = |e| AnalysisError::render(CHART, e);

    let sizes: Vec<f64> = table
        .column(Column::CompanySize)
        .iter()
        .map(|v| v / SIZE_SCALE)
        .collect();
    let revenues: Vec<f64> = table
        .column(Column::Revenue)
        .iter()
        .map(|v| v / BILLION)
        .collect();

    let root = BitMapBackend::new(path, (config.width, config.height)).into_drawing_area();
    root.fill(&WHITE).map_err(err)?;

    let panels = root.split_evenly((1, 2));

    draw_box(
        &panels[0],
        BoxPanel {
            label: "Company Size",
            y_desc: "Number of Employees (100,000)",
            color: series_color(0),
            log_scale: false,
        },
        &sizes,
    )?;
    draw_box(
        &panels[1],
        BoxPanel {
            label: "Revenue",
            y_desc: "€Billion",
            color: series_color(1),
            log_scale: true,
        },
        &revenues,
    )?;

    root.present().map_err(err)?;
    Ok(path.to_path_buf())
}

struct BoxPanel {
    label: &'static str,
    y_desc: &'static str,
    color: RGBColor,
    log_scale: bool,
}

fn draw_box<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: BoxPanel,
    values: &[f64],
) -> Result<(), AnalysisError> {
    if values.is_empty() {
        return Ok(());
    }

    let quartiles = Quartiles::new(values);
    let fences = quartiles.values().map(f64::from);
    let key = [panel.label];

    macro_rules! draw_panel {
        ($y_range:expr) => {{
            let mut chart = ChartBuilder::on(area)
                .margin(20)
                .x_label_area_size(40)
                .y_label_area_size(70)
                .build_cartesian_2d(key[..].into_segmented(), $y_range)
                .map_err(|e| AnalysisError::render(CHART, e))?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_desc(panel.label)
                .y_desc(panel.y_desc)
                .draw()
                .map_err(|e| AnalysisError::render(CHART, e))?;

            chart
                .draw_series(std::iter::once(
                    Boxplot::new_vertical(SegmentValue::CenterOf(&key[0]), &quartiles)
                        .width(60)
                        .whisker_width(0.5)
                        .style(panel.color.stroke_width(2)),
                ))
                .map_err(|e| AnalysisError::render(CHART, e))?;
        }};
    }

    let all_points = values.iter().copied().chain(fences);
    if panel.log_scale {
        let range = log_axis_range(all_points);
        draw_panel!((range.start as f32..range.end as f32).log_scale());
    } else {
        let range = linear_axis_range(all_points);
        draw_panel!(range.start as f32..range.end as f32);
    }

    Ok(())
}
