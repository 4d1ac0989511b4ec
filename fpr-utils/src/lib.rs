//! Shared utility functions for FPR crates.

/// Date utility functions
pub mod dates {
    use crate::error::DateError;
    use chrono::{Datelike, NaiveDate};

    /// Format accepted for month-day strings, e.g. "01-11" for November 1.
    pub const DAY_MONTH_FORMAT: &str = "DD-MM";

    /// A leap year, so that "29-02" is accepted as a month-day.
    const REFERENCE_LEAP_YEAR: i32 = 2000;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a "DD-MM" string into `(month, day)`.
    ///
    /// Both fields must be numeric and the pair must name a real calendar
    /// day in a leap year (so "29-02" is valid but "31-04" is not).
    pub fn parse_day_month(s: &str) -> Result<(u32, u32), DateError> {
        let trimmed = s.trim();
        let invalid = || {
            DateError(format!(
                "'{trimmed}' is not a valid month-day, expected {DAY_MONTH_FORMAT}"
            ))
        };
        let (day_str, month_str) = trimmed.split_once('-').ok_or_else(invalid)?;
        let is_field = |field: &str| {
            (1..=2).contains(&field.len()) && field.chars().all(|c| c.is_ascii_digit())
        };
        if !is_field(day_str) || !is_field(month_str) {
            return Err(invalid());
        }
        let day: u32 = day_str.parse().map_err(|_| invalid())?;
        let month: u32 = month_str.parse().map_err(|_| invalid())?;
        match NaiveDate::from_ymd_opt(REFERENCE_LEAP_YEAR, month, day) {
            Some(_) => Ok((month, day)),
            None => Err(invalid()),
        }
    }

    /// Calendar year a date falls in; water year types are keyed by it.
    pub fn calendar_year(date: &NaiveDate) -> i32 {
        date.year()
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        #[test]
        fn test_format_date() {
            let date = NaiveDate::from_ymd_opt(2023, 6, 5).unwrap();
            assert_eq!(format_date(&date), "2023-06-05");
        }

        #[test]
        fn test_parse_day_month() {
            assert_eq!(parse_day_month("01-11").unwrap(), (11, 1));
            assert_eq!(parse_day_month("28-02").unwrap(), (2, 28));
            assert_eq!(parse_day_month(" 5-6 ").unwrap(), (6, 5));
            assert_eq!(parse_day_month("29-02").unwrap(), (2, 29));
        }

        #[test]
        fn test_parse_day_month_rejects_garbage() {
            let bad_inputs = [
                "", "11", "32-01", "31-04", "01-13", "aa-bb", "2023-01-01", "01/11", "+1-11",
                "+1-+2", "1 -11",
            ];
            for bad in bad_inputs {
                let err = parse_day_month(bad).unwrap_err();
                assert!(err.0.contains(DAY_MONTH_FORMAT), "{bad}: {err}");
            }
        }

        #[test]
        fn test_calendar_year() {
            let dec = NaiveDate::from_ymd_opt(2021, 12, 31).unwrap();
            let jan = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
            assert_eq!(calendar_year(&dec), 2021);
            assert_eq!(calendar_year(&jan), 2022);
        }
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
