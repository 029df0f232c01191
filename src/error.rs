//! Error types for the listing analysis pipeline.
//!
//! Dirty cell values are not errors: the cleaners fold them into
//! [`Parsed::Missing`](crate::clean::Parsed::Missing). The variants here
//! cover the conditions that stop a run.

use thiserror::Error;

/// Errors raised by the library stages.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A column required by the preprocessor is absent from the header row.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Too few rows survived cleaning to analyze anything.
    #[error("Only {retained} of {total} rows survived cleaning (at least {required} required)")]
    InsufficientData {
        retained: usize,
        total: usize,
        required: usize,
    },

    /// A column name that is not one of the numeric columns.
    #[error("Unknown numeric column: {0} (expected company_size or revenue)")]
    UnknownColumn(String),

    /// A chart failed to render or to be written to disk.
    #[error("Failed to render {chart}: {message}")]
    Render {
        chart: &'static str,
        message: String,
    },
}

impl AnalysisError {
    pub(crate) fn render(chart: &'static str, err: impl std::fmt::Display) -> Self {
        AnalysisError::Render {
            chart,
            message: err.to_string(),
        }
    }
}
