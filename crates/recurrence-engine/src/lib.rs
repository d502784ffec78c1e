//! # recurrence-engine
//!
//! Deterministic expansion of recurring task schedules into concrete dates.
//!
//! A user schedules a repeating task against a case by picking a start date,
//! a frequency and a "repeat until" date. This crate turns that into the
//! ordered list of occurrence dates, bounded by an occurrence cap, and drives
//! the per-occurrence creation calls in order.
//!
//! ## Modules
//!
//! - [`calendar`] — day/month arithmetic with end-of-month clamping, date parsing
//! - [`frequency`] — `RecurrenceFrequency` and its step sizes
//! - [`expander`] — start/until/frequency → list of occurrence dates
//! - [`schedule`] — request validation, cap rejection, sequential submission
//! - [`config`] — expansion limits
//! - [`error`] — Error types

pub mod calendar;
pub mod config;
pub mod error;
pub mod expander;
pub mod frequency;
pub mod schedule;

pub use config::ExpanderConfig;
pub use error::RecurrenceError;
pub use expander::{expand, expand_with_limit, Expansion, MAX_OCCURRENCES};
pub use frequency::RecurrenceFrequency;
pub use schedule::{
    plan_schedule, schedule, submit_plan, Occurrence, OccurrenceSink, ScheduleError,
    SchedulePlan, ScheduleRequest, SubmissionError,
};
