//! Report formatting for the computed statistics.
//!
//! Supports the fixed-format text report, pretty JSON and a debug dump.

use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

use crate::preprocess::{CleanedTable, Column};
use crate::stats::{self, Moments, Shape, Summary};

/// Everything a run computes, ready for printing.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub column: Column,
    pub rows_total: usize,
    pub rows_retained: usize,
    pub moments: Moments,
    pub shape: Shape,
    pub company_size: Summary,
    pub revenue: Summary,
    pub correlation: f64,
    pub covariance: f64,
    pub plots: Vec<PathBuf>,
}

impl Report {
    pub fn new(table: &CleanedTable, column: Column, moments: Moments) -> Self {
        let sizes = table.column(Column::CompanySize);
        let revenues = table.column(Column::Revenue);

        Report {
            column,
            rows_total: table.total_rows(),
            rows_retained: table.len(),
            moments,
            shape: Shape::from_moments(&moments),
            company_size: stats::describe(&sizes),
            revenue: stats::describe(&revenues),
            correlation: stats::correlation(&sizes, &revenues),
            covariance: stats::covariance(&sizes, &revenues),
            plots: Vec::new(),
        }
    }

    pub fn with_plots(mut self, plots: Vec<PathBuf>) -> Self {
        self.plots = plots;
        self
    }
}

/// Formats a value with two decimals, spelling non-finite values in lower case.
fn fixed2(v: f64) -> String {
    if v.is_nan() {
        "nan".to_string()
    } else if v == f64::INFINITY {
        "inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-inf".to_string()
    } else {
        format!("{v:.2}")
    }
}

/// Renders the three-line text report for one column.
pub fn render_report(moments: &Moments, column: Column) -> String {
    format!(
        "For the attribute {column}:\n\
         Mean = {}, Standard Deviation = {}, Skewness = {}, and Excess Kurtosis = {}.\n\
         {}\n",
        fixed2(moments.mean),
        fixed2(moments.stddev),
        fixed2(moments.skewness),
        fixed2(moments.excess_kurtosis),
        Shape::from_moments(moments).sentence(),
    )
}

/// Renders the full report as pretty-printed JSON.
pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Logs the report using Rust's debug pretty-print format.
pub fn print_pretty(report: &Report) {
    debug!("{:#?}", report);
}
