//! CSV loader for job-listing exports.

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::AnalysisError;

/// Spellings that mark a cell as absent.
const NA_VALUES: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// A single raw cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Classifies the raw text of one field.
    pub fn from_field(field: &str) -> Self {
        let trimmed = field.trim();
        if NA_VALUES.contains(&trimmed) {
            return Cell::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => Cell::Number(v),
            _ => Cell::Text(field.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text form of a non-null cell, as used for categorical columns.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Number(v) => Some(v.to_string()),
            Cell::Text(s) => Some(s.clone()),
        }
    }
}

/// The whole input file: header row plus classified cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of `name` in the header row.
    pub fn column_index(&self, name: &str) -> Result<usize, AnalysisError> {
        self.headers
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| AnalysisError::MissingColumn(name.to_string()))
    }
}

/// Reads a delimited file from disk.
///
/// # Errors
///
/// Fails if the file cannot be opened, a row has a different number of
/// fields than the header, or the content is not valid UTF-8.
#[tracing::instrument(skip(path), fields(path = %path.as_ref().display()))]
pub fn load_table<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<RawTable> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input file '{}'", path.display()))?;
    let table = read_table(file, delimiter)
        .with_context(|| format!("Failed to parse '{}'", path.display()))?;
    debug!(
        rows = table.len(),
        columns = table.headers.len(),
        "Input table loaded"
    );
    Ok(table)
}

/// Reads a delimited table from any reader.
pub fn read_table<R: Read>(reader: R, delimiter: u8) -> Result<RawTable> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .from_reader(reader);

    let headers = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(Cell::from_field).collect());
    }

    Ok(RawTable { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_classification() {
        assert_eq!(Cell::from_field(""), Cell::Null);
        assert_eq!(Cell::from_field("  "), Cell::Null);
        assert_eq!(Cell::from_field("N/A"), Cell::Null);
        assert_eq!(Cell::from_field("nan"), Cell::Null);
        assert_eq!(Cell::from_field("42"), Cell::Number(42.0));
        assert_eq!(Cell::from_field(" 1.5 "), Cell::Number(1.5));
        assert_eq!(Cell::from_field("1,000"), Cell::Text("1,000".to_string()));
        assert_eq!(Cell::from_field("inf"), Cell::Text("inf".to_string()));
    }

    #[test]
    fn test_read_table_keeps_all_columns() {
        let data = "title,company_size,revenue,seniority_level\n\
                    Analyst,\"1,200\",€5M,Mid\n\
                    Engineer,,,Senior\n";
        let table = read_table(data.as_bytes(), b',').unwrap();

        assert_eq!(table.headers.len(), 4);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][1], Cell::Text("1,200".to_string()));
        assert!(table.rows[1][2].is_null());
        assert_eq!(table.column_index("revenue").unwrap(), 2);
    }

    #[test]
    fn test_missing_column() {
        let table = read_table("a,b\n1,2\n".as_bytes(), b',').unwrap();
        let err = table.column_index("revenue").unwrap_err();
        assert!(matches!(err, AnalysisError::MissingColumn(name) if name == "revenue"));
    }

    #[test]
    fn test_custom_delimiter() {
        let table = read_table("a;b\n1;x\n".as_bytes(), b';').unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows[0][0], Cell::Number(1.0));
    }

    #[test]
    fn test_ragged_rows_are_fatal() {
        let result = read_table("a,b\n1,2,3\n".as_bytes(), b',');
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_table("definitely/not/here.csv", b',');
        assert!(result.is_err());
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let table = read_table("\u{feff}revenue\n1\n".as_bytes(), b',').unwrap();
        assert_eq!(table.column_index("revenue").unwrap(), 0);
    }
}
