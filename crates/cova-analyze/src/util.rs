//! Shared extraction and ratio helpers for the aggregators.

use polars::prelude::*;

use cova_model::{MetricKind, PipelineError, Result};
use cova_transform::CleanedFrame;

/// Round to two decimal places.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage ratio for rate tables: 0.0 when the denominator is zero.
pub(crate) fn percent_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round2(numerator / denominator * 100.0)
    }
}

/// Plain ratio for rate tables: 0.0 when the denominator is zero.
pub(crate) fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        round2(numerator / denominator)
    }
}

/// Guard that a cleaned frame holds the metric a query expects.
pub(crate) fn expect_kind(frame: &CleanedFrame, kind: MetricKind) -> Result<()> {
    if frame.kind != kind {
        return Err(PipelineError::schema(format!(
            "expected a {kind} table, got {actual}",
            actual = frame.kind
        )));
    }
    Ok(())
}

/// Extract a string column as owned values.
pub(crate) fn str_values(data: &DataFrame, name: &str) -> Result<Vec<String>> {
    let chunked = data.column(name)?.str()?.clone();
    Ok(chunked
        .into_iter()
        .map(|value| value.unwrap_or("").to_string())
        .collect())
}

/// Extract an integer column, treating nulls as zero.
pub(crate) fn i64_values(data: &DataFrame, name: &str) -> Result<Vec<i64>> {
    let chunked = data.column(name)?.i64()?.clone();
    Ok(chunked.into_iter().map(|value| value.unwrap_or(0)).collect())
}

/// An `Expr` matching rows whose country is one of the given names.
/// `None` when the list is empty (no rows match).
pub(crate) fn country_filter(countries: &[String]) -> Option<Expr> {
    countries
        .iter()
        .map(|name| col(cova_model::COUNTRY_COL).eq(lit(name.clone())))
        .reduce(|a, b| a.or(b))
}
