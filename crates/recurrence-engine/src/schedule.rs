//! The scheduling workflow around the expander.
//!
//! Turns a form-level [`ScheduleRequest`] into a [`SchedulePlan`] and submits
//! each occurrence to an [`OccurrenceSink`]. Planning is all-or-nothing: a
//! series that would exceed the cap is rejected with
//! `RecurrenceError::RangeTooLong` before anything is submitted. Submission is
//! sequential and in order, so after a failure exactly the prefix up to the
//! failing occurrence has been created. Nothing is rolled back.

use crate::calendar::{parse_date_time, parse_time};
use crate::config::ExpanderConfig;
use crate::error::{RecurrenceError, Result};
use crate::expander::expand_with_limit;
use crate::frequency::RecurrenceFrequency;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use thiserror::Error;

/// A scheduling request as submitted by the task form.
///
/// Dates are kept as text so that missing and malformed values are reported
/// as `InvalidArgument` by [`plan_schedule`] rather than by the deserializer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleRequest {
    /// `YYYY-MM-DD`, optionally followed by a time of day.
    pub start: Option<String>,
    /// Inclusive "repeat until" date. Required for a repeating frequency.
    pub until: Option<String>,
    /// Absent means a single occurrence, but only when `until` is absent too.
    pub frequency: Option<RecurrenceFrequency>,
    /// `HH:MM[:SS]`. Overrides a time embedded in `start`.
    pub time: Option<String>,
}

impl ScheduleRequest {
    pub fn new(start: impl Into<String>, frequency: RecurrenceFrequency) -> Self {
        Self {
            start: Some(start.into()),
            frequency: Some(frequency),
            ..Self::default()
        }
    }

    pub fn until(mut self, until: impl Into<String>) -> Self {
        self.until = Some(until.into());
        self
    }

    pub fn at(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }
}

/// One task instance to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
}

impl Occurrence {
    pub fn new(date: NaiveDate, time: Option<NaiveTime>) -> Self {
        Self { date, time }
    }

    /// The local date-time of this occurrence, if it has a time of day.
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        self.time.map(|t| self.date.and_time(t))
    }
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time {
            Some(time) => write!(f, "{} {}", self.date, time),
            None => write!(f, "{}", self.date),
        }
    }
}

/// The validated list of occurrences for one scheduling action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchedulePlan {
    pub frequency: RecurrenceFrequency,
    pub occurrences: Vec<Occurrence>,
}

impl SchedulePlan {
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// The per-occurrence creation call, typically a task-management API.
pub trait OccurrenceSink {
    type Error: std::error::Error + 'static;

    fn create(&mut self, occurrence: &Occurrence) -> std::result::Result<(), Self::Error>;
}

impl OccurrenceSink for Vec<Occurrence> {
    type Error = Infallible;

    fn create(&mut self, occurrence: &Occurrence) -> std::result::Result<(), Infallible> {
        self.push(*occurrence);
        Ok(())
    }
}

/// A sink failed partway through a plan.
///
/// The first `created` occurrences of the plan were submitted successfully;
/// `occurrence` is the one that failed and nothing after it was attempted.
#[derive(Error, Debug)]
#[error(
    "failed to create occurrence {} of {total} ({occurrence}); {created} created before the failure",
    .created + 1
)]
pub struct SubmissionError<E: std::error::Error + 'static> {
    pub created: usize,
    pub total: usize,
    pub occurrence: Occurrence,
    #[source]
    pub source: E,
}

/// Either the plan was rejected (nothing submitted) or submission failed
/// partway.
#[derive(Error, Debug)]
pub enum ScheduleError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Rejected(#[from] RecurrenceError),

    #[error(transparent)]
    Submission(#[from] SubmissionError<E>),
}

fn non_blank(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

/// Validate a request and expand it into the occurrences to create.
///
/// - `none` frequency yields exactly one occurrence; `until` is ignored.
/// - A missing frequency also yields one occurrence, unless `until` is set.
/// - Repeating frequencies require `until` and are expanded under
///   `config.max_occurrences`.
/// - The time of day (from `time`, else from `start`) is attached to every
///   occurrence.
///
/// # Errors
/// - `RecurrenceError::InvalidArgument` for a missing or malformed start,
///   until or time, an `until` without a frequency, or an invalid config.
/// - `RecurrenceError::RangeTooLong` when the cap would truncate the series.
pub fn plan_schedule(request: &ScheduleRequest, config: &ExpanderConfig) -> Result<SchedulePlan> {
    config.validate()?;

    let start = non_blank(request.start.as_deref())
        .ok_or_else(|| RecurrenceError::invalid("start date is required"))?;
    let (start, embedded_time) = parse_date_time(start)?;
    let time = match non_blank(request.time.as_deref()) {
        Some(text) => Some(parse_time(text)?),
        None => embedded_time,
    };

    let until = non_blank(request.until.as_deref());
    let frequency = match (request.frequency, until) {
        (Some(frequency), _) => frequency,
        (None, None) => RecurrenceFrequency::None,
        (None, Some(_)) => {
            return Err(RecurrenceError::invalid(
                "repeat-until date given without a frequency",
            ))
        }
    };
    if !frequency.is_repeating() {
        tracing::debug!(%start, "single occurrence schedule");
        return Ok(SchedulePlan {
            frequency,
            occurrences: vec![Occurrence::new(start, time)],
        });
    }

    let until = until.ok_or_else(|| {
        RecurrenceError::invalid(format!(
            "repeat-until date is required for a {frequency} schedule"
        ))
    })?;
    let (until, _) = parse_date_time(until)?;

    let expansion = expand_with_limit(start, until, frequency, config.max_occurrences)?;
    if expansion.capped() {
        return Err(RecurrenceError::RangeTooLong {
            frequency,
            max_occurrences: config.max_occurrences,
            until,
        });
    }

    let occurrences = expansion
        .into_dates()
        .into_iter()
        .map(|date| Occurrence::new(date, time))
        .collect();

    Ok(SchedulePlan {
        frequency,
        occurrences,
    })
}

/// Submit every occurrence of `plan` to `sink`, one at a time, in order.
///
/// Returns the number of occurrences created.
///
/// # Errors
/// Stops at the first sink failure and returns a [`SubmissionError`] holding
/// the count of occurrences already created.
pub fn submit_plan<S: OccurrenceSink>(
    plan: &SchedulePlan,
    sink: &mut S,
) -> std::result::Result<usize, SubmissionError<S::Error>> {
    let total = plan.len();
    let span = tracing::debug_span!("submit_plan", frequency = %plan.frequency, total);
    let _guard = span.enter();

    for (created, occurrence) in plan.occurrences.iter().enumerate() {
        tracing::trace!(index = created, %occurrence, "creating occurrence");
        if let Err(source) = sink.create(occurrence) {
            tracing::warn!(created, total, %occurrence, "occurrence creation failed");
            return Err(SubmissionError {
                created,
                total,
                occurrence: *occurrence,
                source,
            });
        }
    }

    tracing::debug!(created = total, "all occurrences created");
    Ok(total)
}

/// Plan and submit in one call. A rejected plan submits nothing.
///
/// # Errors
/// `ScheduleError::Rejected` from [`plan_schedule`], or
/// `ScheduleError::Submission` from [`submit_plan`].
pub fn schedule<S: OccurrenceSink>(
    request: &ScheduleRequest,
    config: &ExpanderConfig,
    sink: &mut S,
) -> std::result::Result<usize, ScheduleError<S::Error>> {
    let plan = plan_schedule(request, config)?;
    Ok(submit_plan(&plan, sink)?)
}
