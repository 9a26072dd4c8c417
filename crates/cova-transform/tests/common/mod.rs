//! Synthetic raw tables shared by the transform tests.

use cova_ingest::RawTable;

pub const DATES: [&str; 4] = ["1/22/20", "1/23/20", "1/24/20", "1/25/20"];

pub fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| (*h).to_string()).collect(),
        rows: rows
            .iter()
            .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
            .collect(),
    }
}

pub fn wide_headers() -> Vec<&'static str> {
    let mut headers = vec!["Province/State", "Country/Region", "Lat", "Long"];
    headers.extend(DATES);
    headers
}

/// Confirmed table: no header promotion needed. Contains a blank province
/// with a forward-fill gap, a two-province country, a blacklisted cruise
/// ship, a row without coordinates, and a country absent from the other
/// metrics.
pub fn confirmed_raw() -> RawTable {
    raw(
        &wide_headers(),
        &[
            &["", "Germany", "51.0", "9.0", "10", "", "", "13"],
            &["Ontario", "Canada", "51.2", "-85.3", "5", "6", "7", "8"],
            &["Quebec", "Canada", "46.8", "-71.2", "1", "1", "2", "3"],
            &["Diamond Princess", "Japan", "35.4", "139.6", "1", "2", "3", "4"],
            &["Unknown", "Narnia", "", "", "9", "9", "9", "9"],
            &["", "Atlantis", "0.0", "0.0", "2", "2", "2", "2"],
        ],
    )
}

/// Deaths table: ships with a throwaway header row, true labels in row 0.
pub fn deaths_raw() -> RawTable {
    let junk: Vec<&str> = vec!["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"];
    let header_row = wide_headers();
    raw(
        &junk,
        &[
            &header_row,
            &["", "Germany", "51.0", "9.0", "1", "1", "2", "2"],
            &["Ontario", "Canada", "51.2", "-85.3", "0", "1", "1", "2"],
            &["Quebec", "Canada", "46.8", "-71.2", "0", "0", "1", "1"],
        ],
    )
}

/// Recovered table: same promoted-header shape as deaths.
pub fn recovered_raw() -> RawTable {
    let junk: Vec<&str> = vec!["c0", "c1", "c2", "c3", "c4", "c5", "c6", "c7"];
    let header_row = wide_headers();
    raw(
        &junk,
        &[
            &header_row,
            &["", "Germany", "51.0", "9.0", "0", "5", "5", "6"],
            &["Ontario", "Canada", "51.2", "-85.3", "2", "2", "3", "4"],
            &["Quebec", "Canada", "46.8", "-71.2", "0", "1", "1", "2"],
        ],
    )
}
