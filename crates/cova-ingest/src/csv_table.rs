//! CSV file loading into a raw string grid.
//!
//! The cleaner operates on raw cell text (header promotion, sentinel fill,
//! forward fill) before any typing happens, so ingestion deliberately returns
//! strings rather than a typed frame.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use cova_model::{PipelineError, Result};

/// A CSV file as read: one header row and the data rows, all as trimmed text.
///
/// Rows are padded with empty cells to the header width; rows consisting
/// entirely of empty cells are skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Number of data rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.headers.len()
    }
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Read a CSV file into a [`RawTable`].
///
/// Fails with [`PipelineError::NotFound`] when the path does not exist and
/// [`PipelineError::Parse`] for malformed CSV.
pub fn read_raw_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(PipelineError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|err| PipelineError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|err| PipelineError::Parse {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(normalize_cell).collect();
        if row.iter().all(|value| value.is_empty()) {
            continue;
        }
        raw_rows.push(row);
    }

    let Some(header_row) = raw_rows.first() else {
        return Err(PipelineError::Parse {
            path: path.to_path_buf(),
            message: "file contains no rows".to_string(),
        });
    };
    let headers = header_row.clone();

    let mut rows = Vec::with_capacity(raw_rows.len().saturating_sub(1));
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }

    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "read csv table"
    );
    Ok(RawTable { headers, rows })
}
