//! Date selection and day arithmetic without any I/O.
//!
//! Provides [`DateSpecifier`], the parsed form of every date the user can
//! type (`--date`, the shell's `date` command), and the checked day shifts
//! used for prev/next navigation.

use crate::constants::{DATE_FORMAT_COMPACT, DATE_FORMAT_ISO};
use crate::errors::{AppError, AppResult};
use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

/// The ways a user can name a diary day.
///
/// # Examples
///
/// ```
/// use daybook::calendar::DateSpecifier;
/// use chrono::NaiveDate;
///
/// let today = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
///
/// let spec: DateSpecifier = "yesterday".parse().unwrap();
/// assert_eq!(spec.resolve(today).unwrap(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
///
/// let spec: DateSpecifier = "+3".parse().unwrap();
/// assert_eq!(spec.resolve(today).unwrap(), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
///
/// let spec: DateSpecifier = "20240115".parse().unwrap();
/// assert_eq!(spec, DateSpecifier::Specific(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateSpecifier {
    /// The reference date itself.
    Today,

    /// One day before the reference date.
    Yesterday,

    /// One day after the reference date.
    Tomorrow,

    /// A signed number of days relative to the reference date (`+N` / `-N`).
    Offset(i64),

    /// An explicit calendar date (`YYYY-MM-DD` or `YYYYMMDD`).
    Specific(NaiveDate),
}

impl DateSpecifier {
    /// Resolves the specifier against `reference` (normally today's local date).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Date` when the offset leaves chrono's date range.
    pub fn resolve(&self, reference: NaiveDate) -> AppResult<NaiveDate> {
        match *self {
            DateSpecifier::Today => Ok(reference),
            DateSpecifier::Yesterday => shift_day(reference, -1),
            DateSpecifier::Tomorrow => shift_day(reference, 1),
            DateSpecifier::Offset(days) => shift_day(reference, days),
            DateSpecifier::Specific(date) => Ok(date),
        }
    }
}

impl FromStr for DateSpecifier {
    type Err = AppError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" | "today" => return Ok(DateSpecifier::Today),
            "yesterday" => return Ok(DateSpecifier::Yesterday),
            "tomorrow" => return Ok(DateSpecifier::Tomorrow),
            _ => {}
        }

        if trimmed.starts_with('+') || trimmed.starts_with('-') {
            return trimmed
                .parse::<i64>()
                .map(DateSpecifier::Offset)
                .map_err(|_| invalid_date(trimmed));
        }

        parse_date(trimmed).map(DateSpecifier::Specific)
    }
}

impl fmt::Display for DateSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateSpecifier::Today => write!(f, "today"),
            DateSpecifier::Yesterday => write!(f, "yesterday"),
            DateSpecifier::Tomorrow => write!(f, "tomorrow"),
            DateSpecifier::Offset(days) => write!(f, "{:+}", days),
            DateSpecifier::Specific(date) => write!(f, "{}", date.format(DATE_FORMAT_ISO)),
        }
    }
}

/// Parses `YYYY-MM-DD` first, then `YYYYMMDD`.
///
/// # Errors
///
/// Returns `AppError::Date` if neither format matches.
pub fn parse_date(input: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(input, DATE_FORMAT_ISO)
        .or_else(|_| NaiveDate::parse_from_str(input, DATE_FORMAT_COMPACT))
        .map_err(|_| invalid_date(input))
}

/// Moves `date` by `days` (negative goes back).
///
/// # Errors
///
/// Returns `AppError::Date` on overflow of the representable calendar.
pub fn shift_day(date: NaiveDate, days: i64) -> AppResult<NaiveDate> {
    Duration::try_days(days)
        .and_then(|delta| date.checked_add_signed(delta))
        .ok_or_else(|| {
            AppError::Date(format!(
                "Cannot move {} days from {}: outside the supported calendar",
                days, date
            ))
        })
}

fn invalid_date(input: &str) -> AppError {
    AppError::Date(format!(
        "Invalid date format: '{}'. Use YYYY-MM-DD, YYYYMMDD, today, yesterday, tomorrow or +N/-N",
        input
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!("today".parse::<DateSpecifier>().unwrap(), DateSpecifier::Today);
        assert_eq!("".parse::<DateSpecifier>().unwrap(), DateSpecifier::Today);
        assert_eq!(
            " Yesterday ".parse::<DateSpecifier>().unwrap(),
            DateSpecifier::Yesterday
        );
        assert_eq!(
            "TOMORROW".parse::<DateSpecifier>().unwrap(),
            DateSpecifier::Tomorrow
        );
    }

    #[test]
    fn test_parse_offsets() {
        assert_eq!("+7".parse::<DateSpecifier>().unwrap(), DateSpecifier::Offset(7));
        assert_eq!("-30".parse::<DateSpecifier>().unwrap(), DateSpecifier::Offset(-30));
        assert!("+seven".parse::<DateSpecifier>().is_err());
    }

    #[test]
    fn test_parse_both_date_formats() {
        assert_eq!(
            "2023-01-15".parse::<DateSpecifier>().unwrap(),
            DateSpecifier::Specific(day(2023, 1, 15))
        );
        assert_eq!(
            "20230115".parse::<DateSpecifier>().unwrap(),
            DateSpecifier::Specific(day(2023, 1, 15))
        );
    }

    #[test]
    fn test_parse_rejects_invalid_dates() {
        for input in ["not-a-date", "2023-02-30", "2023/01/15", "15.01.2023"] {
            match input.parse::<DateSpecifier>() {
                Err(AppError::Date(msg)) => assert!(msg.contains("Invalid date format")),
                other => panic!("Expected Date error for {input}, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_resolve_relative_to_reference() {
        let reference = day(2024, 1, 1);
        assert_eq!(DateSpecifier::Today.resolve(reference).unwrap(), reference);
        assert_eq!(
            DateSpecifier::Yesterday.resolve(reference).unwrap(),
            day(2023, 12, 31)
        );
        assert_eq!(
            DateSpecifier::Tomorrow.resolve(reference).unwrap(),
            day(2024, 1, 2)
        );
        assert_eq!(
            DateSpecifier::Offset(-366).resolve(reference).unwrap(),
            day(2022, 12, 31)
        );
        assert_eq!(
            DateSpecifier::Specific(day(2020, 2, 29)).resolve(reference).unwrap(),
            day(2020, 2, 29)
        );
    }

    #[test]
    fn test_shift_day_crosses_leap_day() {
        assert_eq!(shift_day(day(2024, 2, 28), 1).unwrap(), day(2024, 2, 29));
        assert_eq!(shift_day(day(2024, 3, 1), -1).unwrap(), day(2024, 2, 29));
        assert_eq!(shift_day(day(2023, 3, 1), -1).unwrap(), day(2023, 2, 28));
    }

    #[test]
    fn test_shift_day_overflow_is_an_error() {
        assert!(matches!(
            shift_day(NaiveDate::MAX, 1),
            Err(AppError::Date(_))
        ));
        assert!(matches!(
            shift_day(day(2024, 1, 1), i64::MAX),
            Err(AppError::Date(_))
        ));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for spec in [
            DateSpecifier::Today,
            DateSpecifier::Offset(-2),
            DateSpecifier::Specific(day(2024, 7, 4)),
        ] {
            assert_eq!(spec.to_string().parse::<DateSpecifier>().unwrap(), spec);
        }
    }
}
