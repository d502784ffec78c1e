//! Occurrence expansion -- converts a start date, a "repeat until" date and a
//! frequency into the ordered list of occurrence dates.
//!
//! The start date is always the first occurrence. Each following date is one
//! frequency step after the previous one, and expansion stops at the first
//! date past `until` or when the occurrence cap is reached, whichever comes
//! first.

use crate::error::{RecurrenceError, Result};
use crate::frequency::RecurrenceFrequency;
use chrono::NaiveDate;
use serde::Serialize;

/// Maximum number of occurrences in one series, the start date included.
pub const MAX_OCCURRENCES: usize = 52;

/// Result of expanding a series under an explicit cap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Expansion {
    occurrences: Vec<NaiveDate>,
    /// True when the cap refused a date that was still within `until`.
    capped: bool,
}

impl Expansion {
    pub fn dates(&self) -> &[NaiveDate] {
        &self.occurrences
    }

    pub fn into_dates(self) -> Vec<NaiveDate> {
        self.occurrences
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    /// Always false: the start date is always present.
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.occurrences.last().copied()
    }

    /// Whether the cap stopped expansion before the series reached `until`.
    pub fn capped(&self) -> bool {
        self.capped
    }

    /// Whether the series ran to `until` without hitting the cap.
    pub fn reached_end(&self) -> bool {
        !self.capped
    }
}

/// Expand a recurring schedule into occurrence dates, capped at
/// [`MAX_OCCURRENCES`].
///
/// # Arguments
/// - `start` -- First occurrence, always included (even when `start > end`)
/// - `end` -- Inclusive "repeat until" boundary
/// - `frequency` -- Any repeating frequency
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` for `RecurrenceFrequency::None`.
pub fn expand(
    start: NaiveDate,
    end: NaiveDate,
    frequency: RecurrenceFrequency,
) -> Result<Vec<NaiveDate>> {
    expand_with_limit(start, end, frequency, MAX_OCCURRENCES).map(Expansion::into_dates)
}

/// Expand a recurring schedule under an explicit occurrence cap.
///
/// Identical to [`expand`] but takes the cap as an argument and reports
/// whether it cut the series short. The cap counts the start date and is
/// checked before each append, so at most `max_occurrences` dates are returned.
///
/// # Errors
/// Returns `RecurrenceError::InvalidArgument` for `RecurrenceFrequency::None`
/// or a zero `max_occurrences`.
pub fn expand_with_limit(
    start: NaiveDate,
    end: NaiveDate,
    frequency: RecurrenceFrequency,
    max_occurrences: usize,
) -> Result<Expansion> {
    if !frequency.is_repeating() {
        return Err(RecurrenceError::invalid(
            "frequency 'none' cannot be expanded; schedule a single occurrence instead",
        ));
    }
    if max_occurrences == 0 {
        return Err(RecurrenceError::invalid("max_occurrences must be at least 1"));
    }

    let mut occurrences = vec![start];
    let mut current = start;
    let mut capped = false;

    loop {
        // A step past the representable range is necessarily past `end`.
        let next = match frequency.step(current) {
            Ok(next) if next <= end => next,
            _ => break,
        };
        if occurrences.len() >= max_occurrences {
            tracing::warn!(
                %start,
                %end,
                %frequency,
                max_occurrences,
                refused = %next,
                "occurrence cap reached before end of range"
            );
            capped = true;
            break;
        }
        occurrences.push(next);
        current = next;
    }

    tracing::debug!(
        %start,
        %end,
        %frequency,
        count = occurrences.len(),
        capped,
        "expanded recurrence"
    );

    Ok(Expansion {
        occurrences,
        capped,
    })
}
