//! Transaction date resolution.
//!
//! Statement lines print operation dates as `dd/mm` with no year. The
//! statement's emission date anchors the year: a month numerically later
//! than the emission month belongs to the previous year, because a statement
//! emitted in January still lists December operations.

use crate::error::{ExtractError, Result};
use chrono::{Datelike, NaiveDate};

/// Placeholder year used to validate a day/month pair before the real year
/// is known. 2000 is a leap year, so 29/02 survives validation.
const PLACEHOLDER_YEAR: i32 = 2000;

/// An operation date as printed on a statement line, year unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMonth {
    pub day: u32,
    pub month: u32,
}

impl DayMonth {
    /// Creates a day/month pair, validating it against the placeholder year.
    pub fn new(day: u32, month: u32) -> Result<Self> {
        if NaiveDate::from_ymd_opt(PLACEHOLDER_YEAR, month, day).is_none() {
            return Err(ExtractError::InvalidDate { day, month });
        }
        Ok(DayMonth { day, month })
    }

    /// Parses a `dd/mm` token.
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let (day_str, month_str) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        let day = day_str.parse().unwrap_or(0);
        let month = month_str.parse().unwrap_or(0);
        Self::new(day, month)
    }

    /// Resolves the full calendar date against the statement emission date.
    ///
    /// Months up to and including the emission month are the emission year;
    /// later months are the year before (statements span at most one year
    /// boundary). Fails for 29/02 when the resolved year is not a leap year.
    pub fn resolve(&self, emission: NaiveDate) -> Result<NaiveDate> {
        let year = if self.month <= emission.month() {
            emission.year()
        } else {
            emission.year() - 1
        };
        NaiveDate::from_ymd_opt(year, self.month, self.day).ok_or(ExtractError::InvalidDate {
            day: self.day,
            month: self.month,
        })
    }
}

impl std::fmt::Display for DayMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}/{:02}", self.day, self.month)
    }
}

/// Parses a `dd/mm/yy` balance date. Best effort: balance dates are
/// informational and an unparseable one is simply recorded as absent.
pub fn parse_short_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%y").ok()
}

/// Parses a `dd/mm/yyyy` date token.
pub fn parse_full_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%d/%m/%Y").ok()
}
