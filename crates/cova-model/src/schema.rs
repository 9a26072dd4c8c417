//! Fixed dataset schema: column names, sentinels, and the province blacklist.
//!
//! All three source files share the same shape: four key columns followed by
//! one cumulative-count column per calendar date.

/// First key column: province or state, blank for single-region countries.
pub const PROVINCE_COL: &str = "Province/State";

/// Second key column: country or region name.
pub const COUNTRY_COL: &str = "Country/Region";

/// Latitude of the region centroid.
pub const LAT_COL: &str = "Lat";

/// Longitude of the region centroid.
pub const LONG_COL: &str = "Long";

/// The four leading columns, in required order.
pub const KEY_COLUMNS: [&str; 4] = [PROVINCE_COL, COUNTRY_COL, LAT_COL, LONG_COL];

/// Name of the date column in long-format tables.
pub const DATE_COL: &str = "Date";

/// Name of the calendar-month column in monthly summaries.
pub const MONTH_COL: &str = "Month";

/// Sentinel written into blank province cells.
pub const ALL_PROVINCES: &str = "All Provinces";

/// Pseudo-provinces with no geographic meaning (cruise ships). Rows naming
/// them would corrupt country sums and are dropped during cleaning.
pub const EXCLUDED_PROVINCES: [&str; 3] = ["Diamond Princess", "Grand Princess", "MS Zaandam"];

/// Returns true if the province value names a blacklisted pseudo-entity.
pub fn is_excluded_province(province: &str) -> bool {
    let trimmed = province.trim();
    EXCLUDED_PROVINCES.iter().any(|name| *name == trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cruise_ships_are_excluded() {
        assert!(is_excluded_province("Diamond Princess"));
        assert!(is_excluded_province("  Grand Princess  "));
        assert!(!is_excluded_province("Ontario"));
        assert!(!is_excluded_province("All Provinces"));
    }
}
