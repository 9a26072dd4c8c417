//! Synthetic datasets shared by the aggregator tests.

use cova_ingest::RawTable;
use cova_model::MetricKind;
use cova_transform::{clean, to_long, CleanedFrame, LongFrame, MergedFrame};
use polars::prelude::{Column, DataFrame};

pub const DATES: [&str; 4] = ["1/22/20", "1/23/20", "1/24/20", "1/25/20"];

pub fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
}

pub fn wide_headers() -> Vec<&'static str> {
    let mut headers = vec!["Province/State", "Country/Region", "Lat", "Long"];
    headers.extend(DATES);
    headers
}

pub fn confirmed() -> CleanedFrame {
    let table = raw(
        &wide_headers(),
        &[
            &["", "Germany", "51.0", "9.0", "10", "", "", "13"],
            &["Ontario", "Canada", "51.2", "-85.3", "5", "6", "7", "8"],
            &["Quebec", "Canada", "46.8", "-71.2", "1", "1", "2", "3"],
        ],
    );
    clean(table, MetricKind::ConfirmedCases).unwrap()
}

pub fn deaths() -> CleanedFrame {
    let table = raw(
        &wide_headers(),
        &[
            &["", "Germany", "51.0", "9.0", "1", "1", "2", "2"],
            &["Ontario", "Canada", "51.2", "-85.3", "0", "1", "1", "2"],
            &["Quebec", "Canada", "46.8", "-71.2", "0", "0", "1", "1"],
        ],
    );
    // Dodge header promotion by passing an already-labelled table through the
    // confirmed path, then retag.
    let mut frame = clean(table, MetricKind::ConfirmedCases).unwrap();
    frame.kind = MetricKind::Deaths;
    frame
}

pub fn recovered() -> CleanedFrame {
    let table = raw(
        &wide_headers(),
        &[
            &["", "Germany", "51.0", "9.0", "0", "5", "5", "6"],
            &["Ontario", "Canada", "51.2", "-85.3", "2", "2", "3", "4"],
            &["Quebec", "Canada", "46.8", "-71.2", "0", "1", "1", "2"],
        ],
    );
    let mut frame = clean(table, MetricKind::ConfirmedCases).unwrap();
    frame.kind = MetricKind::Recovered;
    frame
}

pub fn long_deaths() -> LongFrame {
    to_long(&deaths()).unwrap()
}

pub fn merged() -> MergedFrame {
    cova_transform::merge(&deaths(), &confirmed(), &recovered()).unwrap()
}

/// Build a long deaths table directly from (country, iso date, deaths) rows.
pub fn long_deaths_from(rows: &[(&str, &str, i64)]) -> LongFrame {
    let provinces: Vec<String> = rows.iter().map(|_| "All Provinces".to_string()).collect();
    let countries: Vec<String> = rows.iter().map(|(c, _, _)| (*c).to_string()).collect();
    let lats: Vec<f64> = rows.iter().map(|_| 0.0).collect();
    let longs: Vec<f64> = rows.iter().map(|_| 0.0).collect();
    let dates: Vec<String> = rows.iter().map(|(_, d, _)| (*d).to_string()).collect();
    let values: Vec<i64> = rows.iter().map(|(_, _, v)| *v).collect();
    let data = DataFrame::new(vec![
        Column::new("Province/State".into(), provinces),
        Column::new("Country/Region".into(), countries),
        Column::new("Lat".into(), lats),
        Column::new("Long".into(), longs),
        Column::new("Date".into(), dates),
        Column::new("Deaths".into(), values),
    ])
    .unwrap();
    LongFrame {
        kind: MetricKind::Deaths,
        data,
    }
}
