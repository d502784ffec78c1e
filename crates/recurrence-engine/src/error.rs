//! Error types for recurrence-engine operations.

use crate::frequency::RecurrenceFrequency;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceError {
    /// Malformed or missing input: unknown frequency, absent start or
    /// "repeat until" date, unparseable date text, a zero cap.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The series would need more than `max_occurrences` dates to reach `until`.
    #[error(
        "Date range too long for this frequency: a {frequency} series until {until} \
         exceeds {max_occurrences} occurrences"
    )]
    RangeTooLong {
        frequency: RecurrenceFrequency,
        max_occurrences: usize,
        until: NaiveDate,
    },
}

impl RecurrenceError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        RecurrenceError::InvalidArgument(message.into())
    }
}

pub type Result<T> = std::result::Result<T, RecurrenceError>;
