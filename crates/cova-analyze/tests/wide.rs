//! Wide-table aggregator tests.

mod common;

use chrono::NaiveDate;
use cova_analyze::wide::{DEATH_RATES_COL, PEAK_COL, RECOVERY_RATE_COL};
use cova_analyze::{
    compare_recovery_rate, death_rate_distribution, extreme_death_rates, peak_daily_cases,
};
use cova_model::{MetricKind, PipelineError};
use cova_transform::clean;

use common::{confirmed, deaths, raw, recovered, wide_headers};

fn strings(df: &polars::prelude::DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or("").to_string())
        .collect()
}

fn floats(df: &polars::prelude::DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect()
}

#[test]
fn peak_is_last_date_of_a_cumulative_series() {
    // End to end: Germany's forward-filled row peaks at 13, Canada's summed
    // provinces at 11, both on the final date.
    let result = peak_daily_cases(
        &confirmed(),
        &["Germany".to_string(), "Canada".to_string()],
    )
    .unwrap();

    assert_eq!(strings(&result, "Country/Region"), vec!["Germany", "Canada"]);
    let peaks: Vec<i64> = result
        .column(PEAK_COL)
        .unwrap()
        .i64()
        .unwrap()
        .into_iter()
        .map(|v| v.unwrap())
        .collect();
    assert_eq!(peaks, vec![13, 11]);
    assert_eq!(strings(&result, "Date"), vec!["1/25/20", "1/25/20"]);
}

#[test]
fn peak_ties_resolve_to_the_earliest_date() {
    let table = raw(
        &wide_headers(),
        &[&["", "Flatland", "1.0", "1.0", "7", "7", "7", "7"]],
    );
    let frame = clean(table, MetricKind::ConfirmedCases).unwrap();
    let result = peak_daily_cases(&frame, &["Flatland".to_string()]).unwrap();
    assert_eq!(strings(&result, "Date"), vec!["1/22/20"]);
}

#[test]
fn peak_with_no_countries_is_empty() {
    let result = peak_daily_cases(&confirmed(), &[]).unwrap();
    assert_eq!(result.height(), 0);
}

#[test]
fn peak_rejects_non_confirmed_input() {
    assert!(matches!(
        peak_daily_cases(&deaths(), &["Germany".to_string()]),
        Err(PipelineError::Schema { .. })
    ));
}

#[test]
fn recovery_rates_compare_two_countries() {
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let result =
        compare_recovery_rate(&recovered(), &confirmed(), "Canada", "Germany", as_of).unwrap();
    assert_eq!(strings(&result, "Country/Region"), vec!["Canada", "Germany"]);
    // Canada 6/11, Germany 6/13, as percentages rounded to 2 places.
    assert_eq!(floats(&result, RECOVERY_RATE_COL), vec![54.55, 46.15]);
}

#[test]
fn recovery_rate_is_zero_when_confirmed_is_zero() {
    let confirmed_zero = {
        let table = raw(
            &wide_headers(),
            &[&["", "Ghostland", "1.0", "1.0", "0", "0", "0", "0"]],
        );
        clean(table, MetricKind::ConfirmedCases).unwrap()
    };
    let recovered_some = {
        let table = raw(
            &wide_headers(),
            &[&["", "Ghostland", "1.0", "1.0", "1", "2", "3", "4"]],
        );
        let mut frame = clean(table, MetricKind::ConfirmedCases).unwrap();
        frame.kind = MetricKind::Recovered;
        frame
    };
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let result =
        compare_recovery_rate(&recovered_some, &confirmed_zero, "Ghostland", "Nowhere", as_of)
            .unwrap();
    assert_eq!(floats(&result, RECOVERY_RATE_COL), vec![0.0]);
}

#[test]
fn unknown_as_of_date_is_a_schema_error() {
    let as_of = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
    assert!(matches!(
        compare_recovery_rate(&recovered(), &confirmed(), "Canada", "Germany", as_of),
        Err(PipelineError::Schema { .. })
    ));
}

#[test]
fn death_rates_distribute_over_provinces() {
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let result = death_rate_distribution(&deaths(), &confirmed(), "Canada", as_of).unwrap();
    assert_eq!(strings(&result, "Province/State"), vec!["Ontario", "Quebec"]);
    // Ontario 2/8, Quebec 1/3.
    assert_eq!(floats(&result, DEATH_RATES_COL), vec![25.0, 33.33]);
}

#[test]
fn extremes_pick_highest_and_lowest() {
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let distribution = death_rate_distribution(&deaths(), &confirmed(), "Canada", as_of).unwrap();
    let result = extreme_death_rates(&distribution).unwrap();
    assert_eq!(strings(&result, "Province/State"), vec!["Quebec", "Ontario"]);
    assert_eq!(floats(&result, DEATH_RATES_COL), vec![33.33, 25.0]);
}

#[test]
fn extremes_of_empty_distribution_are_empty() {
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let distribution =
        death_rate_distribution(&deaths(), &confirmed(), "Absentland", as_of).unwrap();
    assert_eq!(distribution.height(), 0);
    let result = extreme_death_rates(&distribution).unwrap();
    assert_eq!(result.height(), 0);
}

#[test]
fn extremes_of_single_row_are_one_row() {
    let as_of = NaiveDate::from_ymd_opt(2020, 1, 25).unwrap();
    let distribution =
        death_rate_distribution(&deaths(), &confirmed(), "Germany", as_of).unwrap();
    assert_eq!(distribution.height(), 1);
    let result = extreme_death_rates(&distribution).unwrap();
    assert_eq!(result.height(), 1);
    assert_eq!(strings(&result, "Province/State"), vec!["All Provinces"]);
}
