//! Typed frame wrappers passed between pipeline stages.
//!
//! Each wrapper pairs a polars `DataFrame` with the metric it belongs to, so
//! a long deaths table cannot be handed to a function expecting confirmed
//! cases without an explicit check.

use polars::prelude::DataFrame;

use cova_model::MetricKind;

use crate::clean::CleanStats;

/// A cleaned wide-format table: four key columns, then one `i64` column per
/// date in chronological order.
#[derive(Debug, Clone)]
pub struct CleanedFrame {
    /// Which metric the counts represent.
    pub kind: MetricKind,
    /// The cleaned table.
    pub data: DataFrame,
    /// Date column labels in source (`M/D/YY`) form, chronological.
    pub date_columns: Vec<String>,
    /// What cleaning did to get here.
    pub stats: CleanStats,
}

impl CleanedFrame {
    /// Number of region rows.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Name the metric column takes after reshaping.
    pub fn value_column(&self) -> &'static str {
        self.kind.value_column()
    }
}

/// A long-format table: one row per (region, date), ISO-8601 `Date` column,
/// metric value column named per [`MetricKind::value_column`].
#[derive(Debug, Clone)]
pub struct LongFrame {
    pub kind: MetricKind,
    pub data: DataFrame,
}

impl LongFrame {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    pub fn value_column(&self) -> &'static str {
        self.kind.value_column()
    }
}

/// The three metrics joined per (country, date); provinces already summed.
#[derive(Debug, Clone)]
pub struct MergedFrame {
    pub data: DataFrame,
}

impl MergedFrame {
    pub fn record_count(&self) -> usize {
        self.data.height()
    }
}
