//! Queries over the merged three-metric table.

use std::collections::BTreeMap;

use polars::prelude::*;
use tracing::debug;

use cova_model::{DateWindow, PipelineError, Result, COUNTRY_COL, DATE_COL, MONTH_COL};
use cova_transform::{month_key, parse_iso, MergedFrame};

use crate::util::{i64_values, ratio_or_zero, round2, str_values};

/// Column name for the ratio in [`highest_avg_death_rates`] output.
pub const DEATH_RATE_COL: &str = "Death Rate";

/// Column name for the ratio in [`monthly_recovery_ratio`] output.
pub const RECOVERY_RATIO_COL: &str = "Recovery Ratio";

const CONFIRMED: &str = "Confirmed Cases";
const DEATHS: &str = "Deaths";
const RECOVERED: &str = "Recovered";

/// The merged table pulled into parallel vectors, sorted by (country, date).
struct MergedRows {
    countries: Vec<String>,
    dates: Vec<String>,
    confirmed: Vec<i64>,
    deaths: Vec<i64>,
    recovered: Vec<i64>,
}

impl MergedRows {
    fn len(&self) -> usize {
        self.countries.len()
    }
}

fn merged_rows(frame: &MergedFrame) -> Result<MergedRows> {
    let sorted = frame
        .data
        .sort([COUNTRY_COL, DATE_COL], SortMultipleOptions::default())?;
    Ok(MergedRows {
        countries: str_values(&sorted, COUNTRY_COL)?,
        dates: str_values(&sorted, DATE_COL)?,
        confirmed: i64_values(&sorted, CONFIRMED)?,
        deaths: i64_values(&sorted, DEATHS)?,
        recovered: i64_values(&sorted, RECOVERED)?,
    })
}

/// Per-country day-over-day deltas summed within each calendar month.
pub fn monthly_sums(merged: &MergedFrame) -> Result<DataFrame> {
    let rows = merged_rows(merged)?;

    // (country, month) -> summed (confirmed, deaths, recovered) deltas.
    let mut sums: BTreeMap<(String, String), (i64, i64, i64)> = BTreeMap::new();
    for idx in 0..rows.len() {
        let first_of_country = idx == 0 || rows.countries[idx - 1] != rows.countries[idx];
        let (dc, dd, dr) = if first_of_country {
            // No prior day to difference against.
            (0, 0, 0)
        } else {
            (
                rows.confirmed[idx] - rows.confirmed[idx - 1],
                rows.deaths[idx] - rows.deaths[idx - 1],
                rows.recovered[idx] - rows.recovered[idx - 1],
            )
        };
        let key = (
            rows.countries[idx].clone(),
            month_key(&rows.dates[idx]).to_string(),
        );
        let entry = sums.entry(key).or_insert((0, 0, 0));
        entry.0 += dc;
        entry.1 += dd;
        entry.2 += dr;
    }
    debug!(groups = sums.len(), "computed monthly sums");

    let mut countries = Vec::with_capacity(sums.len());
    let mut months = Vec::with_capacity(sums.len());
    let mut confirmed = Vec::with_capacity(sums.len());
    let mut deaths = Vec::with_capacity(sums.len());
    let mut recovered = Vec::with_capacity(sums.len());
    for ((country, month), (dc, dd, dr)) in sums {
        countries.push(country);
        months.push(month);
        confirmed.push(dc);
        deaths.push(dd);
        recovered.push(dr);
    }
    Ok(DataFrame::new(vec![
        Column::new(COUNTRY_COL.into(), countries),
        Column::new(MONTH_COL.into(), months),
        Column::new("Monthly Confirmed Cases".into(), confirmed),
        Column::new("Monthly Deaths".into(), deaths),
        Column::new("Monthly Recovered".into(), recovered),
    ])?)
}

/// Top-k countries by deaths/confirmed ratio at their last record inside the
/// window, sorted descending with stable ties.
pub fn highest_avg_death_rates(
    merged: &MergedFrame,
    window: DateWindow,
    k: usize,
) -> Result<DataFrame> {
    let rows = merged_rows(merged)?;

    // Last in-window record per country; rows are date-sorted per country.
    let mut last: BTreeMap<String, usize> = BTreeMap::new();
    for idx in 0..rows.len() {
        let date = parse_iso(&rows.dates[idx])?;
        if window.contains(date) {
            last.insert(rows.countries[idx].clone(), idx);
        }
    }

    let mut ranked: Vec<(usize, f64)> = last
        .into_values()
        .map(|idx| {
            let rate = ratio_or_zero(rows.deaths[idx] as f64, rows.confirmed[idx] as f64);
            (idx, rate)
        })
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(k);

    let mut countries = Vec::with_capacity(ranked.len());
    let mut dates = Vec::with_capacity(ranked.len());
    let mut confirmed = Vec::with_capacity(ranked.len());
    let mut deaths = Vec::with_capacity(ranked.len());
    let mut recovered = Vec::with_capacity(ranked.len());
    let mut rates = Vec::with_capacity(ranked.len());
    for (idx, rate) in ranked {
        countries.push(rows.countries[idx].clone());
        dates.push(rows.dates[idx].clone());
        confirmed.push(rows.confirmed[idx]);
        deaths.push(rows.deaths[idx]);
        recovered.push(rows.recovered[idx]);
        rates.push(rate);
    }
    Ok(DataFrame::new(vec![
        Column::new(COUNTRY_COL.into(), countries),
        Column::new(DATE_COL.into(), dates),
        Column::new(CONFIRMED.into(), confirmed),
        Column::new(DEATHS.into(), deaths),
        Column::new(RECOVERED.into(), recovered),
        Column::new(DEATH_RATE_COL.into(), rates),
    ])?)
}

/// Recovered/deaths at a country's latest record. `Ok(None)` when deaths is
/// zero (the ratio is undefined, not infinite); unknown countries are a
/// schema error.
pub fn recovery_death_ratio(merged: &MergedFrame, country: &str) -> Result<Option<f64>> {
    let rows = merged_rows(merged)?;
    let mut latest: Option<usize> = None;
    for idx in 0..rows.len() {
        if rows.countries[idx] == country {
            latest = Some(idx);
        }
    }
    let Some(idx) = latest else {
        return Err(PipelineError::schema(format!(
            "country {country:?} not present in merged table"
        )));
    };
    if rows.deaths[idx] == 0 {
        return Ok(None);
    }
    Ok(Some(round2(
        rows.recovered[idx] as f64 / rows.deaths[idx] as f64,
    )))
}

/// Recovered/confirmed ratio at each month's last record inside the window,
/// for one country, sorted descending by ratio.
pub fn monthly_recovery_ratio(
    merged: &MergedFrame,
    country: &str,
    window: DateWindow,
) -> Result<DataFrame> {
    let rows = merged_rows(merged)?;

    // Last in-window record per month; rows are date-sorted per country.
    let mut last_of_month: BTreeMap<String, usize> = BTreeMap::new();
    for idx in 0..rows.len() {
        if rows.countries[idx] != country {
            continue;
        }
        let date = parse_iso(&rows.dates[idx])?;
        if window.contains(date) {
            last_of_month.insert(month_key(&rows.dates[idx]).to_string(), idx);
        }
    }

    let mut ranked: Vec<(String, usize, f64)> = last_of_month
        .into_iter()
        .map(|(month, idx)| {
            let ratio = ratio_or_zero(rows.recovered[idx] as f64, rows.confirmed[idx] as f64);
            (month, idx, ratio)
        })
        .collect();
    ranked.sort_by(|a, b| b.2.partial_cmp(&a.2).unwrap_or(std::cmp::Ordering::Equal));

    let mut months = Vec::with_capacity(ranked.len());
    let mut dates = Vec::with_capacity(ranked.len());
    let mut confirmed = Vec::with_capacity(ranked.len());
    let mut deaths = Vec::with_capacity(ranked.len());
    let mut recovered = Vec::with_capacity(ranked.len());
    let mut ratios = Vec::with_capacity(ranked.len());
    for (month, idx, ratio) in ranked {
        months.push(month);
        dates.push(rows.dates[idx].clone());
        confirmed.push(rows.confirmed[idx]);
        deaths.push(rows.deaths[idx]);
        recovered.push(rows.recovered[idx]);
        ratios.push(ratio);
    }
    Ok(DataFrame::new(vec![
        Column::new(MONTH_COL.into(), months),
        Column::new(DATE_COL.into(), dates),
        Column::new(CONFIRMED.into(), confirmed),
        Column::new(DEATHS.into(), deaths),
        Column::new(RECOVERED.into(), recovered),
        Column::new(RECOVERY_RATIO_COL.into(), ratios),
    ])?)
}
