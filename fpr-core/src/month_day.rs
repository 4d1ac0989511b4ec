use chrono::{Datelike, NaiveDate};
use fpr_utils::{dates::parse_day_month, error::DateError};
use std::fmt;

/// A calendar day without a year, ordered January 1 through December 31.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// Parse a "DD-MM" string.
    pub fn parse(s: &str) -> Result<MonthDay, DateError> {
        let (month, day) = parse_day_month(s)?;
        Ok(MonthDay { month, day })
    }

    pub fn is_leap_day(&self) -> bool {
        self.month == 2 && self.day == 29
    }
}

impl From<NaiveDate> for MonthDay {
    fn from(value: NaiveDate) -> Self {
        MonthDay {
            month: value.month(),
            day: value.day(),
        }
    }
}

impl From<&NaiveDate> for MonthDay {
    fn from(value: &NaiveDate) -> Self {
        (*value).into()
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.day, self.month)
    }
}

/// An inclusive month-day interval.
///
/// When `start` falls after `end` in the calendar the window spans the new
/// year, e.g. Nov 1 through Feb 28 covers Nov, Dec, Jan and Feb.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct MonthDayWindow {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl MonthDayWindow {
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        MonthDayWindow { start, end }
    }

    /// True if the window crosses December 31.
    pub fn wraps_year_end(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, month_day: MonthDay) -> bool {
        if self.wraps_year_end() {
            month_day >= self.start || month_day <= self.end
        } else {
            self.start <= month_day && month_day <= self.end
        }
    }

    pub fn contains_date(&self, date: &NaiveDate) -> bool {
        self.contains(date.into())
    }
}

impl fmt::Display for MonthDayWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let md = MonthDay::parse("01-11").unwrap();
        assert_eq!(md, MonthDay { month: 11, day: 1 });
        assert_eq!(md.to_string(), "01-11");
        assert!(MonthDay::parse("11/01").is_err());
    }

    #[test]
    fn test_parse_leap_day_and_impossible_days() {
        assert!(MonthDay::parse("29-02").unwrap().is_leap_day());
        assert!(MonthDay::parse("31-04").is_err());
        assert!(MonthDay::parse("01-13").is_err());
    }

    #[test]
    fn test_ordering_is_calendar_order() {
        let jan = MonthDay::from(date(2021, 1, 31));
        let feb = MonthDay::from(date(2021, 2, 1));
        let dec = MonthDay::from(date(2021, 12, 25));
        assert!(jan < feb);
        assert!(feb < dec);
    }

    #[test]
    fn test_window_wraps_year_end() {
        let window = MonthDayWindow::new(
            MonthDay::parse("01-11").unwrap(),
            MonthDay::parse("28-02").unwrap(),
        );
        assert!(window.wraps_year_end());
        assert!(window.contains_date(&date(2021, 12, 25)));
        assert!(window.contains_date(&date(2022, 1, 15)));
        assert!(window.contains_date(&date(2021, 11, 1)));
        assert!(window.contains_date(&date(2022, 2, 28)));
        assert!(!window.contains_date(&date(2022, 6, 1)));
        assert!(!window.contains_date(&date(2021, 10, 31)));
        assert!(!window.contains_date(&date(2022, 3, 1)));
    }

    #[test]
    fn test_window_within_year() {
        let window = MonthDayWindow::new(
            MonthDay::parse("15-04").unwrap(),
            MonthDay::parse("30-06").unwrap(),
        );
        assert!(!window.wraps_year_end());
        assert!(window.contains_date(&date(2020, 4, 15)));
        assert!(window.contains_date(&date(2020, 6, 30)));
        assert!(!window.contains_date(&date(2020, 7, 1)));
        assert!(!window.contains_date(&date(2020, 1, 1)));
    }

    #[test]
    fn test_single_day_window() {
        let md = MonthDay::parse("10-05").unwrap();
        let window = MonthDayWindow::new(md, md);
        assert!(window.contains(md));
        assert!(!window.contains(MonthDay::parse("11-05").unwrap()));
    }
}
