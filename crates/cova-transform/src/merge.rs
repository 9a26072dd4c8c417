//! Merging the three long-format datasets into one per-country series.
//!
//! Each metric is grouped by (country, date) with provinces summed, then the
//! three groupings are inner-joined. Keys present in one grouping but absent
//! from another are dropped by the join on purpose: a country reported by a
//! single dataset has no complete record to show.

use polars::prelude::*;
use tracing::info;

use cova_model::{MetricKind, PipelineError, Result, COUNTRY_COL, DATE_COL};

use crate::frame::{CleanedFrame, LongFrame, MergedFrame};
use crate::reshape::to_long;

fn expect_kind(frame: &CleanedFrame, kind: MetricKind) -> Result<()> {
    if frame.kind != kind {
        return Err(PipelineError::schema(format!(
            "merge expected a {kind} table, got {actual}",
            actual = frame.kind
        )));
    }
    Ok(())
}

/// Provinces summed into one row per (country, date).
fn country_date_sums(long: &LongFrame) -> LazyFrame {
    long.data
        .clone()
        .lazy()
        .group_by_stable([col(COUNTRY_COL), col(DATE_COL)])
        .agg([col(long.value_column()).sum()])
}

/// Inner-join the three cleaned metric tables on (country, date).
pub fn merge(
    deaths: &CleanedFrame,
    confirmed: &CleanedFrame,
    recovered: &CleanedFrame,
) -> Result<MergedFrame> {
    expect_kind(deaths, MetricKind::Deaths)?;
    expect_kind(confirmed, MetricKind::ConfirmedCases)?;
    expect_kind(recovered, MetricKind::Recovered)?;

    let deaths_sums = country_date_sums(&to_long(deaths)?);
    let confirmed_sums = country_date_sums(&to_long(confirmed)?);
    let recovered_sums = country_date_sums(&to_long(recovered)?);

    let keys = [col(COUNTRY_COL), col(DATE_COL)];
    let data = deaths_sums
        .join(
            confirmed_sums,
            keys.clone(),
            keys.clone(),
            JoinArgs::new(JoinType::Inner),
        )
        .join(
            recovered_sums,
            keys.clone(),
            keys.clone(),
            JoinArgs::new(JoinType::Inner),
        )
        .select([
            col(COUNTRY_COL),
            col(DATE_COL),
            col(MetricKind::ConfirmedCases.value_column()),
            col(MetricKind::Deaths.value_column()),
            col(MetricKind::Recovered.value_column()),
        ])
        .sort([COUNTRY_COL, DATE_COL], SortMultipleOptions::default())
        .collect()?;

    info!(rows = data.height(), "merged metric tables");
    Ok(MergedFrame { data })
}
