//! Type-safe enumeration of the three tracked metrics.
//!
//! Every metric-dependent branch in the pipeline dispatches on [`MetricKind`]
//! with an exhaustive `match`, so adding a metric is a compile-time checklist
//! rather than a string comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which of the three source datasets a table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    /// Cumulative confirmed cases.
    ConfirmedCases,
    /// Cumulative deaths.
    Deaths,
    /// Cumulative recoveries.
    Recovered,
}

impl MetricKind {
    /// All metrics in pipeline order (confirmed, deaths, recovered).
    pub const ALL: [MetricKind; 3] = [
        MetricKind::ConfirmedCases,
        MetricKind::Deaths,
        MetricKind::Recovered,
    ];

    /// Name of the value column this metric gets in long format.
    pub fn value_column(&self) -> &'static str {
        match self {
            MetricKind::ConfirmedCases => "Confirmed Cases",
            MetricKind::Deaths => "Deaths",
            MetricKind::Recovered => "Recovered",
        }
    }

    /// The deaths and recovered files ship with a throwaway header row; the
    /// true date labels sit in their first data row.
    pub fn needs_header_promotion(&self) -> bool {
        match self {
            MetricKind::ConfirmedCases => false,
            MetricKind::Deaths | MetricKind::Recovered => true,
        }
    }

    /// Default source file name for this metric.
    pub fn default_file_name(&self) -> &'static str {
        match self {
            MetricKind::ConfirmedCases => "covid_19_confirmed_v1.csv",
            MetricKind::Deaths => "covid_19_deaths_v1.csv",
            MetricKind::Recovered => "covid_19_recovered_v1.csv",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value_column())
    }
}

impl FromStr for MetricKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "confirmed" | "confirmed cases" | "confirmed-cases" | "cases" => {
                Ok(MetricKind::ConfirmedCases)
            }
            "deaths" => Ok(MetricKind::Deaths),
            "recovered" | "recoveries" => Ok(MetricKind::Recovered),
            other => Err(format!("unknown metric: {other}")),
        }
    }
}
