//! CLI argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use cova_model::AnalysisConfig;

#[derive(Parser)]
#[command(
    name = "cova",
    version,
    about = "COVID-19 data analysis case study",
    long_about = "Load, explore, clean, transform, merge, and analyze the three\n\
                  COVID-19 time-series datasets (confirmed cases, deaths, recoveries),\n\
                  with optional AI-generated narrative insights."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Source dataset locations.
#[derive(Args)]
pub struct DataArgs {
    /// Directory containing the three source CSV files.
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = "dataset",
        global = true
    )]
    pub data_dir: PathBuf,

    /// Override the confirmed-cases CSV path.
    #[arg(long, value_name = "PATH", global = true)]
    pub confirmed: Option<PathBuf>,

    /// Override the deaths CSV path.
    #[arg(long, value_name = "PATH", global = true)]
    pub deaths: Option<PathBuf>,

    /// Override the recovered CSV path.
    #[arg(long, value_name = "PATH", global = true)]
    pub recovered: Option<PathBuf>,
}

impl DataArgs {
    pub fn to_config(&self) -> AnalysisConfig {
        let mut config = AnalysisConfig::from_data_dir(&self.data_dir);
        if let Some(path) = &self.confirmed {
            config.confirmed_csv = path.clone();
        }
        if let Some(path) = &self.deaths {
            config.deaths_csv = path.clone();
        }
        if let Some(path) = &self.recovered {
            config.recovered_csv = path.clone();
        }
        config
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Print structure summaries of the three raw datasets.
    Explore,

    /// Clean the three datasets and print a cleaning summary.
    Clean,

    /// Run the full pipeline and print the analysis question set.
    Analyze(AnalyzeArgs),

    /// Send one analysis result to the narrative-insight service.
    Insight(InsightArgs),
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Countries for the peak-cases query.
    #[arg(
        long = "peak-countries",
        value_delimiter = ',',
        default_values_t = ["Germany".to_string(), "France".to_string(), "Italy".to_string()]
    )]
    pub peak_countries: Vec<String>,

    /// First country of the recovery-rate comparison.
    #[arg(long = "rate-country-a", default_value = "Canada")]
    pub rate_country_a: String,

    /// Second country of the recovery-rate comparison.
    #[arg(long = "rate-country-b", default_value = "Australia")]
    pub rate_country_b: String,

    /// As-of date for the rate comparisons (YYYY-MM-DD).
    #[arg(long = "as-of", default_value = "2020-12-31")]
    pub as_of: NaiveDate,

    /// Country for the death-rate distribution.
    #[arg(long = "distribution-country", default_value = "Canada")]
    pub distribution_country: String,

    /// Country for the deaths-over-time series.
    #[arg(long = "deaths-country", default_value = "US")]
    pub deaths_country: String,

    /// Countries kept in the printed monthly-sums table.
    #[arg(
        long = "monthly-countries",
        value_delimiter = ',',
        default_values_t = ["US".to_string(), "Italy".to_string(), "Brazil".to_string()]
    )]
    pub monthly_countries: Vec<String>,

    /// Country for the recovery/death ratio.
    #[arg(long = "ratio-country", default_value = "South Africa")]
    pub ratio_country: String,

    /// Country for the monthly recovery-ratio report.
    #[arg(long = "recovery-country", default_value = "US")]
    pub recovery_country: String,

    /// How many countries the rankings keep.
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Maximum rows to print per table.
    #[arg(long = "max-rows", default_value_t = 15)]
    pub max_rows: usize,
}

#[derive(Args)]
pub struct InsightArgs {
    /// Which analysis result to send.
    #[arg(long, value_enum, default_value = "total-deaths")]
    pub analysis: AnalysisArg,

    /// The analysis question to pose.
    #[arg(long)]
    pub question: String,

    /// Country parameter for country-scoped analyses.
    #[arg(long, default_value = "US")]
    pub country: String,

    /// Override the text-generation model.
    #[arg(long)]
    pub model: Option<String>,

    /// Maximum rows of the result table to include in the prompt.
    #[arg(long = "max-rows", default_value_t = 30)]
    pub max_rows: usize,
}

/// Analyses that can feed the insight service.
#[derive(Clone, Copy, ValueEnum)]
pub enum AnalysisArg {
    /// Total deaths per country at the latest date.
    TotalDeaths,
    /// Top countries by average daily deaths.
    AvgDailyDeaths,
    /// Deaths over time for one country.
    DeathsOverTime,
    /// Monthly sums of all three metrics.
    MonthlySums,
    /// Highest death rates in calendar 2020.
    DeathRates2020,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
