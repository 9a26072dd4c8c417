//! Queries over the long-format deaths table.
//!
//! Provinces are collapsed to one row per (country, date) before any
//! differencing, so a delta never spans two provinces' series.

use polars::prelude::*;
use tracing::debug;

use cova_model::{MetricKind, PipelineError, Result, COUNTRY_COL, DATE_COL};
use cova_transform::LongFrame;

use crate::util::{i64_values, str_values};

/// Column name for the ranking in [`highest_avg_daily_deaths`] output.
pub const AVG_DAILY_DEATHS_COL: &str = "Average Daily Deaths";

fn expect_deaths(long: &LongFrame) -> Result<()> {
    if long.kind != MetricKind::Deaths {
        return Err(PipelineError::schema(format!(
            "expected a long Deaths table, got {actual}",
            actual = long.kind
        )));
    }
    Ok(())
}

/// One row per (country, date), provinces summed, sorted by country then date.
fn per_country_series(long: &LongFrame) -> Result<DataFrame> {
    Ok(long
        .data
        .clone()
        .lazy()
        .group_by_stable([col(COUNTRY_COL), col(DATE_COL)])
        .agg([col(long.value_column()).sum()])
        .sort([COUNTRY_COL, DATE_COL], SortMultipleOptions::default())
        .collect()?)
}

/// Total deaths per country at the latest date present, sorted descending.
pub fn total_deaths_per_country(long_deaths: &LongFrame) -> Result<DataFrame> {
    expect_deaths(long_deaths)?;
    let dates = long_deaths.data.column(DATE_COL)?.str()?.clone();
    let Some(latest) = dates.into_iter().flatten().max() else {
        return Err(PipelineError::schema("deaths table has no rows"));
    };
    let latest = latest.to_string();
    debug!(%latest, "computing total deaths per country");

    Ok(long_deaths
        .data
        .clone()
        .lazy()
        .filter(col(DATE_COL).eq(lit(latest)))
        .group_by_stable([col(COUNTRY_COL)])
        .agg([col(long_deaths.value_column()).sum()])
        .sort(
            [long_deaths.value_column()],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .collect()?)
}

/// Top-k countries by mean day-over-day death delta over the full range.
/// The first date's delta is 0; ties keep the stable (country-sorted) order.
pub fn highest_avg_daily_deaths(long_deaths: &LongFrame, k: usize) -> Result<DataFrame> {
    expect_deaths(long_deaths)?;
    let series = per_country_series(long_deaths)?;
    let countries = str_values(&series, COUNTRY_COL)?;
    let values = i64_values(&series, long_deaths.value_column())?;

    // Rows are sorted by (country, date); fold each country's run into a mean.
    let mut means: Vec<(String, f64)> = Vec::new();
    let mut idx = 0;
    while idx < countries.len() {
        let country = &countries[idx];
        let mut prev = values[idx];
        let mut delta_sum = 0.0;
        let mut count = 1usize;
        let mut end = idx + 1;
        while end < countries.len() && countries[end] == *country {
            delta_sum += (values[end] - prev) as f64;
            prev = values[end];
            count += 1;
            end += 1;
        }
        means.push((country.clone(), delta_sum / count as f64));
        idx = end;
    }

    means.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    means.truncate(k);

    let (names, averages): (Vec<String>, Vec<f64>) = means.into_iter().unzip();
    Ok(DataFrame::new(vec![
        Column::new(COUNTRY_COL.into(), names),
        Column::new(AVG_DAILY_DEATHS_COL.into(), averages),
    ])?)
}

/// One country's deaths over time, provinces summed, sorted by date.
pub fn deaths_over_time(long_deaths: &LongFrame, country: &str) -> Result<DataFrame> {
    expect_deaths(long_deaths)?;
    Ok(long_deaths
        .data
        .clone()
        .lazy()
        .filter(col(COUNTRY_COL).eq(lit(country.to_string())))
        .group_by_stable([col(DATE_COL)])
        .agg([col(long_deaths.value_column()).sum()])
        .sort([DATE_COL], SortMultipleOptions::default())
        .collect()?)
}
