//! Human-readable publish dates.

use chrono::NaiveDate;

const INVALID_DATE: &str = "Invalid Date";

/// Parse a `YYYY-MM-DD` publish date.
pub fn parse_pub_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Format a `YYYY-MM-DD` date as `Month D, YYYY` (e.g. `June 7, 2025`).
///
/// Schema validation only checks the pattern, so calendar-impossible dates
/// like `2025-02-30` still reach this point. They render as `Invalid Date`
/// rather than failing the build.
pub fn format_pub_date(value: &str) -> String {
    match parse_pub_date(value) {
        Some(date) => format_long(date),
        None => INVALID_DATE.to_string(),
    }
}

/// `Month D, YYYY` for an already-parsed date.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
