//! The cleaning stage.
//!
//! Normalizes a raw wide-format table in a fixed step order: header
//! promotion, schema validation, province sentinel fill, pseudo-province
//! removal, geo-row removal, row-wise forward fill, a repeat of the
//! pseudo-province filter, and type coercion into a typed frame. The order is
//! load-bearing: forward fill must run after row removal so dropped rows
//! never donate values, and coercion runs last so every surviving date cell
//! is numeric.

use polars::prelude::*;
use tracing::{debug, info};

use cova_ingest::RawTable;
use cova_model::{
    is_excluded_province, MetricKind, PipelineError, Result, ALL_PROVINCES, KEY_COLUMNS,
    LAT_COL, LONG_COL,
};

use crate::frame::CleanedFrame;

/// Counters describing one cleaning run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Data rows in the raw table (after header promotion, if any).
    pub raw_rows: usize,
    /// Blank provinces replaced with the sentinel.
    pub provinces_filled: usize,
    /// Rows dropped for naming a blacklisted pseudo-province.
    pub excluded_rows: usize,
    /// Rows dropped for missing Lat/Long.
    pub missing_geo_rows: usize,
    /// Date cells filled from the previous date.
    pub cells_filled: usize,
    /// Rows in the cleaned frame.
    pub rows: usize,
}

/// Clean one raw metric table into a typed wide frame.
pub fn clean(raw: RawTable, kind: MetricKind) -> Result<CleanedFrame> {
    let mut table = raw;
    if kind.needs_header_promotion() {
        promote_header_row(&mut table)?;
    }
    let date_columns = validate_schema(&table)?;

    let mut stats = CleanStats {
        raw_rows: table.height(),
        ..CleanStats::default()
    };
    stats.provinces_filled = fill_missing_province(&mut table);
    stats.excluded_rows = drop_excluded_provinces(&mut table);
    stats.missing_geo_rows = drop_missing_coordinates(&mut table);
    stats.cells_filled = forward_fill_dates(&mut table);
    // Pseudo-province rows reintroduced by any earlier step must not survive.
    stats.excluded_rows += drop_excluded_provinces(&mut table);

    let data = coerce_types(&table, &date_columns)?;
    stats.rows = data.height();
    info!(
        metric = %kind,
        raw_rows = stats.raw_rows,
        rows = stats.rows,
        excluded = stats.excluded_rows,
        missing_geo = stats.missing_geo_rows,
        filled = stats.cells_filled,
        "cleaned table"
    );
    Ok(CleanedFrame {
        kind,
        data,
        date_columns,
        stats,
    })
}

/// Relabel columns from the first data row and drop that row.
///
/// The deaths and recovered files ship with a throwaway header row; the true
/// date labels sit in their first data row.
pub fn promote_header_row(table: &mut RawTable) -> Result<()> {
    if table.rows.is_empty() {
        return Err(PipelineError::schema(
            "cannot promote header row: table has no data rows",
        ));
    }
    table.headers = table.rows.remove(0);
    Ok(())
}

/// Check the four leading key columns and return the date column labels.
pub fn validate_schema(table: &RawTable) -> Result<Vec<String>> {
    if table.headers.len() <= KEY_COLUMNS.len() {
        return Err(PipelineError::schema(format!(
            "expected {} key columns plus date columns, found {} columns",
            KEY_COLUMNS.len(),
            table.headers.len()
        )));
    }
    for (expected, actual) in KEY_COLUMNS.iter().zip(&table.headers) {
        if expected != actual {
            return Err(PipelineError::schema(format!(
                "expected key column {expected:?}, found {actual:?}"
            )));
        }
    }
    Ok(table.headers[KEY_COLUMNS.len()..].to_vec())
}

/// Replace blank province cells with the `"All Provinces"` sentinel.
pub fn fill_missing_province(table: &mut RawTable) -> usize {
    let mut filled = 0;
    for row in &mut table.rows {
        if row[0].is_empty() {
            row[0] = ALL_PROVINCES.to_string();
            filled += 1;
        }
    }
    filled
}

/// Drop rows naming a blacklisted pseudo-province. Returns rows removed.
pub fn drop_excluded_provinces(table: &mut RawTable) -> usize {
    let before = table.rows.len();
    table.rows.retain(|row| !is_excluded_province(&row[0]));
    before - table.rows.len()
}

/// Drop rows with a missing Lat or Long. Returns rows removed.
pub fn drop_missing_coordinates(table: &mut RawTable) -> usize {
    let before = table.rows.len();
    table.rows.retain(|row| !row[2].is_empty() && !row[3].is_empty());
    before - table.rows.len()
}

/// Forward-fill missing date cells row-wise, left to right. A missing value
/// inherits the previous date's count; a missing first date stays missing.
/// Returns cells filled.
pub fn forward_fill_dates(table: &mut RawTable) -> usize {
    let mut filled = 0;
    for row in &mut table.rows {
        let mut last: Option<String> = None;
        for cell in row.iter_mut().skip(KEY_COLUMNS.len()) {
            if cell.is_empty() {
                if let Some(value) = &last {
                    *cell = value.clone();
                    filled += 1;
                }
            } else {
                last = Some(cell.clone());
            }
        }
    }
    debug!(filled, "forward-filled date cells");
    filled
}

fn parse_count(cell: &str, column: &str) -> Result<i64> {
    if let Ok(value) = cell.parse::<i64>() {
        return Ok(value);
    }
    // Tables that passed through float-typed tools render counts as "12.0".
    if let Ok(value) = cell.parse::<f64>() {
        if value.fract() == 0.0 {
            return Ok(value as i64);
        }
    }
    Err(PipelineError::cleaning(
        column,
        format!("non-numeric count {cell:?} after forward fill"),
    ))
}

fn parse_coordinate(cell: &str, column: &str) -> Result<f64> {
    cell.parse::<f64>().map_err(|_| {
        PipelineError::cleaning(column, format!("non-numeric coordinate {cell:?}"))
    })
}

/// Coerce the string grid into its final types: text names, float
/// coordinates, integer date columns.
pub fn coerce_types(table: &RawTable, date_columns: &[String]) -> Result<DataFrame> {
    let height = table.rows.len();
    let mut provinces = Vec::with_capacity(height);
    let mut countries = Vec::with_capacity(height);
    let mut lats = Vec::with_capacity(height);
    let mut longs = Vec::with_capacity(height);
    for row in &table.rows {
        provinces.push(row[0].clone());
        countries.push(row[1].clone());
        lats.push(parse_coordinate(&row[2], LAT_COL)?);
        longs.push(parse_coordinate(&row[3], LONG_COL)?);
    }

    let mut columns = vec![
        Column::new(KEY_COLUMNS[0].into(), provinces),
        Column::new(KEY_COLUMNS[1].into(), countries),
        Column::new(LAT_COL.into(), lats),
        Column::new(LONG_COL.into(), longs),
    ];
    for (offset, label) in date_columns.iter().enumerate() {
        let idx = KEY_COLUMNS.len() + offset;
        let mut values: Vec<Option<i64>> = Vec::with_capacity(height);
        for row in &table.rows {
            let cell = row[idx].as_str();
            if cell.is_empty() {
                // Only a missing leading date survives forward fill.
                values.push(None);
            } else {
                values.push(Some(parse_count(cell, label)?));
            }
        }
        columns.push(Column::new(label.as_str().into(), values));
    }
    Ok(DataFrame::new(columns)?)
}
