//! Pipeline orchestration: load → clean → reshape → merge.
//!
//! Everything is recomputed from the CSV files on each run; a failed stage
//! halts the run for that metric rather than producing partial tables.

use tracing::{info, info_span};

use cova_ingest::{read_raw_table, RawTable};
use cova_model::{AnalysisConfig, MetricKind, Result};
use cova_transform::{clean, merge, to_long, CleanedFrame, LongFrame, MergedFrame};

/// The three cleaned tables of one pipeline run.
pub struct PipelineOutput {
    pub confirmed: CleanedFrame,
    pub deaths: CleanedFrame,
    pub recovered: CleanedFrame,
}

/// Load one metric's raw table.
pub fn load_raw(config: &AnalysisConfig, kind: MetricKind) -> Result<RawTable> {
    read_raw_table(config.path_for(kind))
}

/// Load and clean all three datasets.
pub fn clean_all(config: &AnalysisConfig) -> Result<PipelineOutput> {
    let span = info_span!("clean_all");
    let _guard = span.enter();

    let confirmed = clean(
        load_raw(config, MetricKind::ConfirmedCases)?,
        MetricKind::ConfirmedCases,
    )?;
    let deaths = clean(load_raw(config, MetricKind::Deaths)?, MetricKind::Deaths)?;
    let recovered = clean(
        load_raw(config, MetricKind::Recovered)?,
        MetricKind::Recovered,
    )?;
    info!(
        confirmed_rows = confirmed.record_count(),
        deaths_rows = deaths.record_count(),
        recovered_rows = recovered.record_count(),
        "pipeline cleaned all datasets"
    );
    Ok(PipelineOutput {
        confirmed,
        deaths,
        recovered,
    })
}

impl PipelineOutput {
    /// Long-format deaths table.
    pub fn long_deaths(&self) -> Result<LongFrame> {
        to_long(&self.deaths)
    }

    /// The three metrics merged per (country, date).
    pub fn merged(&self) -> Result<MergedFrame> {
        merge(&self.deaths, &self.confirmed, &self.recovered)
    }
}
