//! Shared utility functions for MET crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{NaiveDate, NaiveDateTime};

    /// Date format used for the `Date` column written back out: "YYYY-MM-DD"
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Date-only formats accepted in station CSV files, tried in order.
    pub const ACCEPTED_DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y"];

    /// Date-time formats accepted in station CSV files; the time part is dropped.
    pub const ACCEPTED_DATETIME_FORMATS: [&str; 3] =
        ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y%m%d %H%M"];

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date cell from a station file.
    ///
    /// Accepts "YYYY-MM-DD", "YYYYMMDD" and "MM/DD/YYYY", with or without a
    /// trailing time of day.
    pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
        let trimmed = s.trim();
        for format in ACCEPTED_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                return Ok(date);
            }
        }
        for format in ACCEPTED_DATETIME_FORMATS {
            if let Ok(date_time) = NaiveDateTime::parse_from_str(trimmed, format) {
                return Ok(date_time.date());
            }
        }
        Err(DateError(format!("unrecognized date '{}'", trimmed)))
    }

}

/// Error types
pub mod error {
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    pub struct DateError(pub String);

    impl fmt::Display for DateError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "Date error: {}", self.0)
        }
    }

    impl std::error::Error for DateError {}
}
