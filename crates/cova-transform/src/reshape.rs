//! Wide-to-long reshaping.
//!
//! Stacks the date columns of a cleaned frame into (Date, value) row pairs,
//! repeating the four key columns. Output row count is exactly
//! `rows × date columns`.

use polars::prelude::*;
use tracing::debug;

use cova_model::{Result, COUNTRY_COL, DATE_COL, LAT_COL, LONG_COL, PROVINCE_COL};

use crate::date::{parse_mdy, to_iso};
use crate::frame::{CleanedFrame, LongFrame};

fn str_column(data: &DataFrame, name: &str) -> Result<Vec<String>> {
    let chunked = data.column(name)?.str()?.clone();
    Ok(chunked
        .into_iter()
        .map(|value| value.unwrap_or("").to_string())
        .collect())
}

fn f64_column(data: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let chunked = data.column(name)?.f64()?.clone();
    Ok(chunked.into_iter().map(|value| value.unwrap_or(0.0)).collect())
}

/// Melt a cleaned wide frame into long format.
///
/// Date labels are parsed with the `M/D/YY` format and stored as ISO-8601
/// strings; a label that does not match propagates
/// [`cova_model::PipelineError::DateParse`].
pub fn to_long(frame: &CleanedFrame) -> Result<LongFrame> {
    let height = frame.data.height();
    let dates = &frame.date_columns;

    let iso_dates: Vec<String> = dates
        .iter()
        .map(|label| parse_mdy(label).map(to_iso))
        .collect::<Result<_>>()?;

    let provinces = str_column(&frame.data, PROVINCE_COL)?;
    let countries = str_column(&frame.data, COUNTRY_COL)?;
    let lats = f64_column(&frame.data, LAT_COL)?;
    let longs = f64_column(&frame.data, LONG_COL)?;

    let capacity = height * dates.len();
    let mut out_province = Vec::with_capacity(capacity);
    let mut out_country = Vec::with_capacity(capacity);
    let mut out_lat = Vec::with_capacity(capacity);
    let mut out_long = Vec::with_capacity(capacity);
    let mut out_date = Vec::with_capacity(capacity);
    let mut out_value: Vec<Option<i64>> = Vec::with_capacity(capacity);

    for (label, iso) in dates.iter().zip(&iso_dates) {
        let counts = frame.data.column(label)?.i64()?.clone();
        for row in 0..height {
            out_province.push(provinces[row].clone());
            out_country.push(countries[row].clone());
            out_lat.push(lats[row]);
            out_long.push(longs[row]);
            out_date.push(iso.clone());
            out_value.push(counts.get(row));
        }
    }

    let data = DataFrame::new(vec![
        Column::new(PROVINCE_COL.into(), out_province),
        Column::new(COUNTRY_COL.into(), out_country),
        Column::new(LAT_COL.into(), out_lat),
        Column::new(LONG_COL.into(), out_long),
        Column::new(DATE_COL.into(), out_date),
        Column::new(frame.value_column().into(), out_value),
    ])?;
    debug!(
        metric = %frame.kind,
        rows = data.height(),
        "reshaped wide table to long format"
    );
    Ok(LongFrame {
        kind: frame.kind,
        data,
    })
}
