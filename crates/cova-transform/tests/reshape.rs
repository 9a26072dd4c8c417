//! Reshaping tests: shape, alignment, and the wide/long round trip.

mod common;

use std::collections::HashMap;

use cova_model::{MetricKind, PipelineError};
use cova_transform::{clean, to_long};

use common::{confirmed_raw, raw, DATES};

#[test]
fn long_row_count_is_rows_times_dates() {
    let frame = clean(confirmed_raw(), MetricKind::ConfirmedCases).unwrap();
    let long = to_long(&frame).unwrap();
    assert_eq!(long.record_count(), frame.record_count() * DATES.len());
}

#[test]
fn dates_become_iso_strings() {
    let frame = clean(confirmed_raw(), MetricKind::ConfirmedCases).unwrap();
    let long = to_long(&frame).unwrap();
    let dates = long.data.column("Date").unwrap().str().unwrap().clone();
    let mut seen: Vec<String> = dates
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect();
    seen.sort();
    seen.dedup();
    assert_eq!(
        seen,
        vec!["2020-01-22", "2020-01-23", "2020-01-24", "2020-01-25"]
    );
}

#[test]
fn value_column_is_named_for_the_metric() {
    let frame = clean(confirmed_raw(), MetricKind::ConfirmedCases).unwrap();
    let long = to_long(&frame).unwrap();
    assert!(long.data.column("Confirmed Cases").is_ok());
}

#[test]
fn long_values_reconstruct_the_wide_table() {
    let frame = clean(confirmed_raw(), MetricKind::ConfirmedCases).unwrap();
    let long = to_long(&frame).unwrap();

    // Index the long rows by (province, country, date).
    let provinces = long.data.column("Province/State").unwrap().str().unwrap().clone();
    let countries = long.data.column("Country/Region").unwrap().str().unwrap().clone();
    let dates = long.data.column("Date").unwrap().str().unwrap().clone();
    let values = long.data.column("Confirmed Cases").unwrap().i64().unwrap().clone();
    let mut by_key: HashMap<(String, String, String), i64> = HashMap::new();
    for idx in 0..long.record_count() {
        by_key.insert(
            (
                provinces.get(idx).unwrap().to_string(),
                countries.get(idx).unwrap().to_string(),
                dates.get(idx).unwrap().to_string(),
            ),
            values.get(idx).unwrap(),
        );
    }

    let wide_provinces = frame.data.column("Province/State").unwrap().str().unwrap().clone();
    let wide_countries = frame.data.column("Country/Region").unwrap().str().unwrap().clone();
    let iso = ["2020-01-22", "2020-01-23", "2020-01-24", "2020-01-25"];
    for row in 0..frame.record_count() {
        for (label, iso_date) in DATES.iter().zip(iso) {
            let expected = frame
                .data
                .column(label)
                .unwrap()
                .i64()
                .unwrap()
                .get(row)
                .unwrap();
            let key = (
                wide_provinces.get(row).unwrap().to_string(),
                wide_countries.get(row).unwrap().to_string(),
                iso_date.to_string(),
            );
            assert_eq!(by_key[&key], expected);
        }
    }
}

#[test]
fn unparseable_date_label_fails_reshape() {
    let table = raw(
        &["Province/State", "Country/Region", "Lat", "Long", "banana"],
        &[&["", "Germany", "51.0", "9.0", "1"]],
    );
    let frame = clean(table, MetricKind::ConfirmedCases).unwrap();
    match to_long(&frame) {
        Err(PipelineError::DateParse { value }) => assert_eq!(value, "banana"),
        other => panic!("expected DateParse error, got {other:?}"),
    }
}
