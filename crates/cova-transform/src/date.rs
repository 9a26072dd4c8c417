//! Calendar-date parsing for the source `M/D/YY` column labels.
//!
//! The upstream files label date columns without zero padding ("1/22/20"),
//! which chrono's strptime cannot express, so parsing splits on `/` directly.
//! Inside frames dates are kept as ISO-8601 strings: lexicographic order is
//! chronological order, and `NaiveDate` is the type at API boundaries.

use chrono::NaiveDate;

use cova_model::{PipelineError, Result};

/// Parse a `M/D/YY` label (two-digit year, 2000-based) into a `NaiveDate`.
pub fn parse_mdy(value: &str) -> Result<NaiveDate> {
    let invalid = || PipelineError::DateParse {
        value: value.to_string(),
    };
    let mut parts = value.trim().split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(invalid());
    };
    let month: u32 = month.parse().map_err(|_| invalid())?;
    let day: u32 = day.parse().map_err(|_| invalid())?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    if !(0..100).contains(&year) {
        return Err(invalid());
    }
    NaiveDate::from_ymd_opt(2000 + year, month, day).ok_or_else(invalid)
}

/// Format a date as an ISO-8601 `YYYY-MM-DD` string.
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse an ISO-8601 `YYYY-MM-DD` string back into a `NaiveDate`.
pub fn parse_iso(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| PipelineError::DateParse {
        value: value.to_string(),
    })
}

/// Calendar-month key (`YYYY-MM`) for an ISO date string.
pub fn month_key(iso_date: &str) -> &str {
    if iso_date.len() >= 7 {
        &iso_date[..7]
    } else {
        iso_date
    }
}
