//! Date formatting for printed fields

use chrono::{Datelike, NaiveDate};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parse a `YYYY-MM-DD` date as produced by HTML date inputs
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(e) => {
            log::debug!("ignoring unparseable date '{value}': {e}");
            None
        }
    }
}

/// `05 MAR 1998`
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        MONTHS[date.month0() as usize],
        date.year()
    )
}

/// `5/3/1998`
pub fn format_numeric_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Long form of an ISO date string, empty when it does not parse
pub fn long_date_text(value: &str) -> String {
    parse_iso_date(value)
        .map(format_long_date)
        .unwrap_or_default()
}
