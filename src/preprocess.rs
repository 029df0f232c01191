//! Column selection, normalization and row filtering.

use serde::Serialize;
use std::collections::HashMap;
use std::str::FromStr;
use tracing::{debug, info, warn};

use crate::clean::{Parsed, clean_company_size, clean_revenue};
use crate::error::AnalysisError;
use crate::loader::RawTable;

pub const COMPANY_SIZE: &str = "company_size";
pub const REVENUE: &str = "revenue";
pub const SENIORITY_LEVEL: &str = "seniority_level";

/// Retention ratio under which the loss of rows is reported as a warning.
const LOW_RETENTION_RATIO: f64 = 0.10;

/// A numeric column of the cleaned table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    CompanySize,
    Revenue,
}

impl Column {
    pub fn name(self) -> &'static str {
        match self {
            Column::CompanySize => COMPANY_SIZE,
            Column::Revenue => REVENUE,
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Column {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            COMPANY_SIZE => Ok(Column::CompanySize),
            REVENUE => Ok(Column::Revenue),
            other => Err(AnalysisError::UnknownColumn(other.to_string())),
        }
    }
}

/// One row that survived cleaning.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanRecord {
    pub company_size: f64,
    pub revenue: f64,
    pub seniority_level: String,
}

impl CleanRecord {
    pub fn get(&self, column: Column) -> f64 {
        match column {
            Column::CompanySize => self.company_size,
            Column::Revenue => self.revenue,
        }
    }
}

/// Cleaned rows in input order, plus the size of the table they came from.
#[derive(Debug, Clone, Default)]
pub struct CleanedTable {
    records: Vec<CleanRecord>,
    total_rows: usize,
}

impl CleanedTable {
    pub fn new(records: Vec<CleanRecord>, total_rows: usize) -> Self {
        Self {
            records,
            total_rows,
        }
    }

    pub fn records(&self) -> &[CleanRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_rows(&self) -> usize {
        self.total_rows
    }

    /// Rows removed by cleaning; zero if `total_rows` undercounts the records.
    pub fn dropped(&self) -> usize {
        self.total_rows.saturating_sub(self.records.len())
    }

    /// All values of one numeric column.
    pub fn column(&self, column: Column) -> Vec<f64> {
        self.records.iter().map(|r| r.get(column)).collect()
    }

    /// Frequency of each seniority level, most frequent first.
    ///
    /// Levels with equal counts keep the order in which they first appear.
    pub fn seniority_counts(&self) -> Vec<(String, usize)> {
        let mut index: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for record in &self.records {
            match index.get(record.seniority_level.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(&record.seniority_level, counts.len());
                    counts.push((record.seniority_level.clone(), 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}

/// Normalizes the three analyzed columns and drops incomplete rows.
///
/// A row is kept only when company size and revenue both parse and the
/// seniority level is present. Fails when fewer than `min_rows` rows remain.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn preprocess(table: &RawTable, min_rows: usize) -> Result<CleanedTable, AnalysisError> {
    let size_idx = table.column_index(COMPANY_SIZE)?;
    let revenue_idx = table.column_index(REVENUE)?;
    let level_idx = table.column_index(SENIORITY_LEVEL)?;

    let records: Vec<CleanRecord> = table
        .rows
        .iter()
        .filter_map(|row| {
            let size = clean_company_size(&row[size_idx]);
            let revenue = clean_revenue(&row[revenue_idx]);
            let level = row[level_idx].as_label();

            match (size, revenue, level) {
                (Parsed::Parsed(company_size), Parsed::Parsed(revenue), Some(seniority_level)) => {
                    Some(CleanRecord {
                        company_size,
                        revenue,
                        seniority_level,
                    })
                }
                _ => None,
            }
        })
        .collect();

    let cleaned = CleanedTable::new(records, table.len());
    info!(
        total = cleaned.total_rows(),
        retained = cleaned.len(),
        dropped = cleaned.dropped(),
        "Preprocessing complete"
    );

    if cleaned.len() < min_rows.max(1) {
        return Err(AnalysisError::InsufficientData {
            retained: cleaned.len(),
            total: cleaned.total_rows(),
            required: min_rows.max(1),
        });
    }

    let retention = cleaned.len() as f64 / cleaned.total_rows() as f64;
    if retention < LOW_RETENTION_RATIO {
        warn!(
            retention_pct = retention * 100.0,
            "Most rows were dropped during cleaning"
        );
    } else {
        debug!(retention, "Row retention");
    }

    Ok(cleaned)
}
