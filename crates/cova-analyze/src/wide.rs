//! Queries over cleaned wide-format tables.
//!
//! These operate on cumulative date columns directly. In particular,
//! [`peak_daily_cases`] reports the maximum of the cumulative series and the
//! first date-column label attaining it; for non-decreasing data that is the
//! series' final value. The series is not differenced first.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use polars::prelude::*;
use tracing::debug;

use cova_model::{MetricKind, PipelineError, Result, COUNTRY_COL, PROVINCE_COL};
use cova_transform::{parse_mdy, CleanedFrame};

use crate::util::{country_filter, expect_kind, percent_or_zero, str_values};

/// Column name for the peak value in [`peak_daily_cases`] output.
pub const PEAK_COL: &str = "Max Confirmed Cases Per Day";

/// Column name for rates in [`compare_recovery_rate`] output.
pub const RECOVERY_RATE_COL: &str = "Recovery Rate (%)";

/// Column name for rates in [`death_rate_distribution`] output.
pub const DEATH_RATES_COL: &str = "Death Rates";

/// Find the date-column label matching a calendar date.
fn date_label(frame: &CleanedFrame, date: NaiveDate) -> Result<String> {
    for label in &frame.date_columns {
        if parse_mdy(label)? == date {
            return Ok(label.clone());
        }
    }
    Err(PipelineError::schema(format!(
        "no date column matching {date}"
    )))
}

/// Sum one date column per country (or per province within one country).
fn grouped_sums(
    frame: &CleanedFrame,
    key_column: &str,
    filter: Option<Expr>,
    label: &str,
) -> Result<BTreeMap<String, i64>> {
    let mut lazy = frame.data.clone().lazy();
    if let Some(expr) = filter {
        lazy = lazy.filter(expr);
    }
    let grouped = lazy
        .group_by_stable([col(key_column)])
        .agg([col(label).sum()])
        .collect()?;
    let keys = str_values(&grouped, key_column)?;
    let sums = crate::util::i64_values(&grouped, label)?;
    Ok(keys.into_iter().zip(sums).collect())
}

/// Per-country peak of the cumulative confirmed series and the first date
/// attaining it, sorted descending by peak.
pub fn peak_daily_cases(confirmed: &CleanedFrame, countries: &[String]) -> Result<DataFrame> {
    expect_kind(confirmed, MetricKind::ConfirmedCases)?;

    let mut rows: Vec<(String, i64, String)> = Vec::new();
    if let Some(filter) = country_filter(countries) {
        let date_sums: Vec<Expr> = confirmed
            .date_columns
            .iter()
            .map(|label| col(label.as_str()).sum())
            .collect();
        let grouped = confirmed
            .data
            .clone()
            .lazy()
            .filter(filter)
            .group_by_stable([col(COUNTRY_COL)])
            .agg(date_sums)
            .collect()?;

        let names = str_values(&grouped, COUNTRY_COL)?;
        for (idx, name) in names.iter().enumerate() {
            let mut best: Option<(i64, &str)> = None;
            for label in &confirmed.date_columns {
                let value = grouped.column(label)?.i64()?.get(idx).unwrap_or(0);
                // Strict comparison keeps the first (earliest) date on ties.
                if best.is_none_or(|(max, _)| value > max) {
                    best = Some((value, label));
                }
            }
            let (max, label) = best.ok_or_else(|| {
                PipelineError::schema("confirmed table has no date columns")
            })?;
            rows.push((name.clone(), max, label.to_string()));
        }
    }
    rows.sort_by(|a, b| b.1.cmp(&a.1));
    debug!(countries = rows.len(), "computed peak cases");

    let (names, maxes, dates): (Vec<String>, Vec<i64>, Vec<String>) = {
        let mut names = Vec::with_capacity(rows.len());
        let mut maxes = Vec::with_capacity(rows.len());
        let mut dates = Vec::with_capacity(rows.len());
        for (name, max, date) in rows {
            names.push(name);
            maxes.push(max);
            dates.push(date);
        }
        (names, maxes, dates)
    };
    Ok(DataFrame::new(vec![
        Column::new(COUNTRY_COL.into(), names),
        Column::new(PEAK_COL.into(), maxes),
        Column::new("Date".into(), dates),
    ])?)
}

/// Recovery rate (recovered / confirmed × 100) for two countries as of one
/// date. Countries absent from the data are omitted.
pub fn compare_recovery_rate(
    recovered: &CleanedFrame,
    confirmed: &CleanedFrame,
    country_a: &str,
    country_b: &str,
    as_of: NaiveDate,
) -> Result<DataFrame> {
    expect_kind(recovered, MetricKind::Recovered)?;
    expect_kind(confirmed, MetricKind::ConfirmedCases)?;
    let label = date_label(recovered, as_of)?;
    // The three files share one date axis; confirmed must carry it too.
    if !confirmed.date_columns.contains(&label) {
        return Err(PipelineError::schema(format!(
            "confirmed table has no date column matching {as_of}"
        )));
    }

    let requested = vec![country_a.to_string(), country_b.to_string()];
    let filter = country_filter(&requested);
    let recovered_sums = grouped_sums(recovered, COUNTRY_COL, filter.clone(), &label)?;
    let confirmed_sums = grouped_sums(confirmed, COUNTRY_COL, filter, &label)?;

    let mut names = Vec::new();
    let mut rates = Vec::new();
    for country in requested {
        let (Some(rec), Some(conf)) = (
            recovered_sums.get(&country),
            confirmed_sums.get(&country),
        ) else {
            continue;
        };
        names.push(country);
        rates.push(percent_or_zero(*rec as f64, *conf as f64));
    }
    Ok(DataFrame::new(vec![
        Column::new(COUNTRY_COL.into(), names),
        Column::new(RECOVERY_RATE_COL.into(), rates),
    ])?)
}

/// Death rate (deaths / confirmed × 100) per province of one country at one
/// date. Provinces reported by only one of the two tables get a 0.0 rate.
pub fn death_rate_distribution(
    deaths: &CleanedFrame,
    confirmed: &CleanedFrame,
    country: &str,
    as_of: NaiveDate,
) -> Result<DataFrame> {
    expect_kind(deaths, MetricKind::Deaths)?;
    expect_kind(confirmed, MetricKind::ConfirmedCases)?;
    let label = date_label(deaths, as_of)?;

    let requested = vec![country.to_string()];
    let filter = country_filter(&requested);
    let death_sums = grouped_sums(deaths, PROVINCE_COL, filter.clone(), &label)?;
    let confirmed_sums = grouped_sums(confirmed, PROVINCE_COL, filter, &label)?;

    let mut provinces: Vec<&String> = death_sums.keys().chain(confirmed_sums.keys()).collect();
    provinces.sort();
    provinces.dedup();

    let mut names = Vec::with_capacity(provinces.len());
    let mut rates = Vec::with_capacity(provinces.len());
    for province in provinces {
        let rate = match (death_sums.get(province), confirmed_sums.get(province)) {
            (Some(d), Some(c)) => percent_or_zero(*d as f64, *c as f64),
            _ => 0.0,
        };
        names.push(province.clone());
        rates.push(rate);
    }
    Ok(DataFrame::new(vec![
        Column::new(PROVINCE_COL.into(), names),
        Column::new(DEATH_RATES_COL.into(), rates),
    ])?)
}

/// The single highest and single lowest rows of a death-rate distribution.
/// An empty distribution yields an empty frame, not an error.
pub fn extreme_death_rates(distribution: &DataFrame) -> Result<DataFrame> {
    let provinces = str_values(distribution, PROVINCE_COL)?;
    let rates = distribution.column(DEATH_RATES_COL)?.f64()?.clone();
    if provinces.is_empty() {
        return Ok(distribution.head(Some(0)));
    }

    let mut max_idx = 0usize;
    let mut min_idx = 0usize;
    for idx in 0..provinces.len() {
        let rate = rates.get(idx).unwrap_or(0.0);
        if rate > rates.get(max_idx).unwrap_or(0.0) {
            max_idx = idx;
        }
        if rate < rates.get(min_idx).unwrap_or(0.0) {
            min_idx = idx;
        }
    }

    let mut picks = vec![max_idx];
    if min_idx != max_idx {
        picks.push(min_idx);
    }
    let names: Vec<String> = picks.iter().map(|&i| provinces[i].clone()).collect();
    let values: Vec<f64> = picks.iter().map(|&i| rates.get(i).unwrap_or(0.0)).collect();
    Ok(DataFrame::new(vec![
        Column::new(PROVINCE_COL.into(), names),
        Column::new(DEATH_RATES_COL.into(), values),
    ])?)
}
