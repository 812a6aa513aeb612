use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::fmt;

/// A date interval `[lower, upper]`, or `[lower, upper)` when
/// `upper_inclusive` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateWindow {
    pub lower: NaiveDate,
    pub upper: NaiveDate,
    pub upper_inclusive: bool,
}

impl DateWindow {
    pub fn closed(lower: NaiveDate, upper: NaiveDate) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: true,
        }
    }

    pub fn half_open(lower: NaiveDate, upper: NaiveDate) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: false,
        }
    }

    /// `[upper - weeks_back weeks, upper]`, inclusive at both ends.
    pub fn trailing(upper: NaiveDate, weeks_back: u32) -> Self {
        Self::closed(weeks_before(upper, weeks_back), upper)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if date < self.lower {
            return false;
        }
        if self.upper_inclusive {
            date <= self.upper
        } else {
            date < self.upper
        }
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let close = if self.upper_inclusive { ']' } else { ')' };
        write!(f, "[{}, {}{}", self.lower, self.upper, close)
    }
}

/// `date` minus `weeks` weeks, clamped to the earliest representable date.
pub fn weeks_before(date: NaiveDate, weeks: u32) -> NaiveDate {
    Duration::try_weeks(i64::from(weeks))
        .and_then(|delta| date.checked_sub_signed(delta))
        .unwrap_or(NaiveDate::MIN)
}
