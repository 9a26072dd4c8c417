//! Subcommand implementations.

use anyhow::Result;
use polars::prelude::*;
use tracing::info;

use cova_analyze::{
    compare_recovery_rate, death_rate_distribution, deaths_over_time, extreme_death_rates,
    highest_avg_daily_deaths, highest_avg_death_rates, monthly_recovery_ratio, monthly_sums,
    peak_daily_cases, recovery_death_ratio, total_deaths_per_country,
};
use cova_ingest::dataset_info;
use cova_insight::InsightClient;
use cova_model::{AnalysisConfig, MetricKind, COUNTRY_COL, CALENDAR_2020, RECOVERY_WINDOW};
use cova_report::{frame_to_string, render_frame};

use crate::cli::{AnalysisArg, AnalyzeArgs, InsightArgs};
use crate::pipeline::{clean_all, load_raw};
use crate::summary::print_cleaning_summary;

fn print_section(title: &str, df: &DataFrame, limit: Option<usize>) {
    println!("\n== {title} ==");
    println!("{}", render_frame(df, limit));
}

/// Keep only rows whose country is in the list; an empty list keeps all rows.
fn filter_countries(df: &DataFrame, countries: &[String]) -> Result<DataFrame> {
    let Some(filter) = countries
        .iter()
        .map(|name| col(COUNTRY_COL).eq(lit(name.clone())))
        .reduce(|a, b| a.or(b))
    else {
        return Ok(df.clone());
    };
    Ok(df.clone().lazy().filter(filter).collect()?)
}

/// Print structure summaries of the three raw datasets.
pub fn run_explore(config: &AnalysisConfig) -> Result<()> {
    for kind in MetricKind::ALL {
        let table = load_raw(config, kind)?;
        println!("\n== {kind} ({}) ==", config.path_for(kind).display());
        println!("{}", dataset_info(&table));
    }
    Ok(())
}

/// Clean the three datasets and print the per-metric summary.
pub fn run_clean(config: &AnalysisConfig) -> Result<()> {
    let output = clean_all(config)?;
    print_cleaning_summary(&output);
    Ok(())
}

/// Run the full pipeline and print the analysis question set.
pub fn run_analyze(config: &AnalysisConfig, args: &AnalyzeArgs) -> Result<()> {
    let output = clean_all(config)?;
    let long_deaths = output.long_deaths()?;
    let merged = output.merged()?;
    let limit = Some(args.max_rows);

    let peaks = peak_daily_cases(&output.confirmed, &args.peak_countries)?;
    print_section("Peak daily confirmed cases", &peaks, None);

    let rates = compare_recovery_rate(
        &output.recovered,
        &output.confirmed,
        &args.rate_country_a,
        &args.rate_country_b,
        args.as_of,
    )?;
    print_section(
        &format!(
            "Recovery rates: {} vs {} (as of {})",
            args.rate_country_a, args.rate_country_b, args.as_of
        ),
        &rates,
        None,
    );

    let distribution = death_rate_distribution(
        &output.deaths,
        &output.confirmed,
        &args.distribution_country,
        args.as_of,
    )?;
    print_section(
        &format!(
            "Death-rate distribution: {} (as of {})",
            args.distribution_country, args.as_of
        ),
        &distribution,
        limit,
    );
    let extremes = extreme_death_rates(&distribution)?;
    print_section("Highest and lowest death rates", &extremes, None);

    let totals = total_deaths_per_country(&long_deaths)?;
    print_section("Total deaths per country to date", &totals, limit);

    let averages = highest_avg_daily_deaths(&long_deaths, args.top)?;
    print_section(
        &format!("Top {} countries by average daily deaths", args.top),
        &averages,
        None,
    );

    let over_time = deaths_over_time(&long_deaths, &args.deaths_country)?;
    print_section(
        &format!("Deaths over time: {}", args.deaths_country),
        &over_time,
        limit,
    );

    let monthly = monthly_sums(&merged)?;
    let monthly_filtered = filter_countries(&monthly, &args.monthly_countries)?;
    print_section(
        &format!(
            "Monthly new cases, deaths, recoveries: {}",
            args.monthly_countries.join(", ")
        ),
        &monthly_filtered,
        limit,
    );

    let death_rates = highest_avg_death_rates(&merged, CALENDAR_2020, args.top)?;
    print_section(
        &format!("Highest death rates in 2020 (top {})", args.top),
        &death_rates,
        None,
    );

    match recovery_death_ratio(&merged, &args.ratio_country)? {
        Some(ratio) => println!(
            "\n== Recovery/death ratio: {} ==\n{ratio}",
            args.ratio_country
        ),
        None => println!(
            "\n== Recovery/death ratio: {} ==\nundefined (no deaths recorded)",
            args.ratio_country
        ),
    }

    let recovery = monthly_recovery_ratio(&merged, &args.recovery_country, RECOVERY_WINDOW)?;
    print_section(
        &format!(
            "Monthly recovery ratio: {} ({} to {})",
            args.recovery_country, RECOVERY_WINDOW.start, RECOVERY_WINDOW.end
        ),
        &recovery,
        limit,
    );

    Ok(())
}

/// Send one analysis result to the narrative-insight service.
pub fn run_insight(config: &AnalysisConfig, args: &InsightArgs) -> Result<()> {
    let output = clean_all(config)?;
    let frame = match args.analysis {
        AnalysisArg::TotalDeaths => total_deaths_per_country(&output.long_deaths()?)?,
        AnalysisArg::AvgDailyDeaths => highest_avg_daily_deaths(&output.long_deaths()?, 5)?,
        AnalysisArg::DeathsOverTime => deaths_over_time(&output.long_deaths()?, &args.country)?,
        AnalysisArg::MonthlySums => monthly_sums(&output.merged()?)?,
        AnalysisArg::DeathRates2020 => {
            highest_avg_death_rates(&output.merged()?, CALENDAR_2020, 5)?
        }
    };
    let data = frame_to_string(&frame, Some(args.max_rows));

    let client = match InsightClient::from_env() {
        Ok(client) => match &args.model {
            Some(model) => client.with_model(model),
            None => client,
        },
        Err(err) => {
            eprintln!("insight unavailable: {err}");
            return Ok(());
        }
    };
    info!(question = %args.question, "requesting insight");
    match client.generate_insight(&args.question, &data) {
        Ok(text) => println!("{text}"),
        // An insight failure is displayed, never fatal to the pipeline.
        Err(err) => eprintln!("insight generation failed: {err}"),
    }
    Ok(())
}
