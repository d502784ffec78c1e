//! Calendar arithmetic and date parsing over plain `NaiveDate` values.
//!
//! Everything here works on calendar dates only. Wall-clock time is split off
//! by [`parse_date_time`] and carried separately by the caller, so no timezone
//! or DST rule can move an occurrence to a different day.

use crate::error::{RecurrenceError, Result};
use chrono::{Days, Months, NaiveDate, NaiveTime};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Add `days` calendar days to `date`.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` if the result falls outside the
/// range `chrono` can represent.
pub fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(days)))
        .ok_or_else(|| RecurrenceError::invalid(format!("{date} + {days} days is out of range")))
}

/// Add `months` calendar months to `date`, keeping the day of month.
///
/// When the target month is shorter than the day of month, the result is
/// clamped to the target month's last day: Jan 31 + 1 month is Feb 28, or
/// Feb 29 in a leap year.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` if the result falls outside the
/// range `chrono` can represent.
pub fn add_months_clamped(date: NaiveDate, months: u32) -> Result<NaiveDate> {
    date.checked_add_months(Months::new(months)).ok_or_else(|| {
        RecurrenceError::invalid(format!("{date} + {months} months is out of range"))
    })
}

/// Parse a `YYYY-MM-DD` date. Surrounding whitespace is ignored.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` for empty or malformed text.
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RecurrenceError::invalid("empty date"));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|e| RecurrenceError::invalid(format!("invalid date '{trimmed}': {e}")))
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` for empty or malformed text.
pub fn parse_time(text: &str) -> Result<NaiveTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RecurrenceError::invalid("empty time"));
    }
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| RecurrenceError::invalid(format!("invalid time '{trimmed}': {e}")))
}

/// Parse either a bare date or a local date-time (`2025-01-01T09:30`,
/// `2025-01-01 09:30:00`), returning the time of day separately.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` if either half is malformed.
pub fn parse_date_time(text: &str) -> Result<(NaiveDate, Option<NaiveTime>)> {
    let trimmed = text.trim();
    match trimmed.split_once(['T', ' ']) {
        Some((date, time)) => Ok((parse_date(date)?, Some(parse_time(time)?))),
        None => Ok((parse_date(trimmed)?, None)),
    }
}
