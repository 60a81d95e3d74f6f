//! Resolution of the optional month/year filter into a concrete period.
//!
//! | month | year | period                          |
//! |-------|------|---------------------------------|
//! | yes   | yes  | that month of that year         |
//! | yes   | no   | that month of the current year  |
//! | no    | yes  | the whole year                  |
//! | no    | no   | the current month               |

use std::{fmt::Display, ops::RangeInclusive};

use serde::Deserialize;
use time::{Date, Month};

use crate::expense::validation::ValidationError;

const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// The span of time an expense listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// A single calendar month.
    Month {
        /// The year the month belongs to.
        year: i32,
        /// The month of the year.
        month: Month,
    },
    /// A whole calendar year.
    Year(i32),
}

impl Period {
    /// The period containing `date`'s month.
    pub fn month_of(date: Date) -> Self {
        Period::Month {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The first and last day of the period.
    pub fn date_range(self) -> RangeInclusive<Date> {
        match self {
            Period::Month { year, month } => first_day(year, month)..=last_day(year, month),
            Period::Year(year) => first_day(year, Month::January)..=last_day(year, Month::December),
        }
    }

    /// The value of a `<input type="month">` for this period, e.g. "2024-03".
    ///
    /// Year periods use January.
    pub fn month_input_value(self) -> String {
        let (year, month) = match self {
            Period::Month { year, month } => (year, month),
            Period::Year(year) => (year, Month::January),
        };

        format!("{year:04}-{:02}", u8::from(month))
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Period::Month { year, month } => write!(f, "{month} {year}"),
            Period::Year(year) => write!(f, "{year}"),
        }
    }
}

// Years are validated to 1..=9999, which the `time` crate supports without
// the `large-dates` feature, so building these dates cannot fail.
fn first_day(year: i32, month: Month) -> Date {
    Date::from_calendar_date(year, month, 1).unwrap_or(Date::MIN)
}

fn last_day(year: i32, month: Month) -> Date {
    if month == Month::December {
        return Date::from_calendar_date(year, month, 31).unwrap_or(Date::MAX);
    }

    first_day(year, month.next())
        .previous_day()
        .unwrap_or(Date::MAX)
}

/// The query string parameters of the JSON listing, e.g. `?month=3&year=2024`.
///
/// Values are kept as strings so that bad input can be reported as a
/// [ValidationError] rather than a generic rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodQuery {
    /// A month from 1 to 12.
    pub month: Option<String>,
    /// A four digit year.
    pub year: Option<String>,
}

impl PeriodQuery {
    /// Resolve the query into a [Period], filling in missing parts from
    /// `today`.
    ///
    /// Empty parameters are treated as absent.
    ///
    /// # Errors
    /// Returns [ValidationError::InvalidMonth] or [ValidationError::InvalidYear]
    /// if a given value is not a whole number in range.
    pub fn resolve(&self, today: Date) -> Result<Period, ValidationError> {
        let month = non_empty(&self.month).map(parse_month).transpose()?;
        let year = non_empty(&self.year).map(parse_year).transpose()?;

        let period = match (month, year) {
            (Some(month), Some(year)) => Period::Month { year, month },
            (Some(month), None) => Period::Month {
                year: today.year(),
                month,
            },
            (None, Some(year)) => Period::Year(year),
            (None, None) => Period::month_of(today),
        };

        Ok(period)
    }
}

/// The query string of the HTML views, e.g. `?period=2024-03`.
///
/// This is the format produced by `<input type="month">`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MonthInputQuery {
    /// A month in the format `YYYY-MM`.
    pub period: Option<String>,
}

impl MonthInputQuery {
    /// Resolve the month input into a [Period], defaulting to the month of
    /// `today`.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the value is not in the format
    /// `YYYY-MM` or either part is out of range.
    pub fn resolve(&self, today: Date) -> Result<Period, ValidationError> {
        let Some(raw) = non_empty(&self.period) else {
            return Ok(Period::month_of(today));
        };

        let Some((year, month)) = raw.split_once('-') else {
            return Err(ValidationError::InvalidMonth(raw.to_owned()));
        };

        PeriodQuery {
            month: Some(month.to_owned()),
            year: Some(year.to_owned()),
        }
        .resolve(today)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_month(raw: &str) -> Result<Month, ValidationError> {
    raw.parse::<u8>()
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(|| ValidationError::InvalidMonth(raw.to_owned()))
}

fn parse_year(raw: &str) -> Result<i32, ValidationError> {
    raw.parse::<i32>()
        .ok()
        .filter(|year| (MIN_YEAR..=MAX_YEAR).contains(year))
        .ok_or_else(|| ValidationError::InvalidYear(raw.to_owned()))
}
