pub mod combined;
pub mod long;
mod util;
pub mod wide;

pub use combined::{
    highest_avg_death_rates, monthly_recovery_ratio, monthly_sums, recovery_death_ratio,
};
pub use long::{deaths_over_time, highest_avg_daily_deaths, total_deaths_per_country};
pub use wide::{
    compare_recovery_rate, death_rate_distribution, extreme_death_rates, peak_daily_cases,
};
