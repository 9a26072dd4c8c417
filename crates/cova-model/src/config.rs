//! Pipeline configuration.
//!
//! Paths and report date ranges are explicit values handed to the pipeline
//! entry points, never ambient globals, so runs are reproducible against
//! synthetic inputs.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::MetricKind;

/// Locations of the three source CSV files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub confirmed_csv: PathBuf,
    pub deaths_csv: PathBuf,
    pub recovered_csv: PathBuf,
}

impl AnalysisConfig {
    /// Build a config from a dataset directory using the default file names.
    pub fn from_data_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            confirmed_csv: dir.join(MetricKind::ConfirmedCases.default_file_name()),
            deaths_csv: dir.join(MetricKind::Deaths.default_file_name()),
            recovered_csv: dir.join(MetricKind::Recovered.default_file_name()),
        }
    }

    /// Path for one metric's source file.
    pub fn path_for(&self, kind: MetricKind) -> &Path {
        match kind {
            MetricKind::ConfirmedCases => &self.confirmed_csv,
            MetricKind::Deaths => &self.deaths_csv,
            MetricKind::Recovered => &self.recovered_csv,
        }
    }
}

/// An inclusive calendar-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Calendar year 2020, used by the death-rate ranking.
pub const CALENDAR_2020: DateWindow = DateWindow {
    start: match NaiveDate::from_ymd_opt(2020, 1, 1) {
        Some(date) => date,
        None => unreachable!(),
    },
    end: match NaiveDate::from_ymd_opt(2020, 12, 31) {
        Some(date) => date,
        None => unreachable!(),
    },
};

/// March 2020 through May 2021, used by the monthly recovery-ratio report.
pub const RECOVERY_WINDOW: DateWindow = DateWindow {
    start: match NaiveDate::from_ymd_opt(2020, 3, 1) {
        Some(date) => date,
        None => unreachable!(),
    },
    end: match NaiveDate::from_ymd_opt(2021, 5, 31) {
        Some(date) => date,
        None => unreachable!(),
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_paths_follow_metric() {
        let config = AnalysisConfig::from_data_dir("dataset");
        assert!(
            config
                .path_for(MetricKind::Deaths)
                .ends_with("covid_19_deaths_v1.csv")
        );
        assert!(
            config
                .path_for(MetricKind::ConfirmedCases)
                .ends_with("covid_19_confirmed_v1.csv")
        );
    }

    #[test]
    fn window_is_inclusive() {
        assert!(CALENDAR_2020.contains(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
        assert!(CALENDAR_2020.contains(NaiveDate::from_ymd_opt(2020, 12, 31).unwrap()));
        assert!(!CALENDAR_2020.contains(NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()));
    }
}
