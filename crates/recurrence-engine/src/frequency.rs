//! Recurrence frequencies and the calendar step each one advances by.

use crate::calendar::{add_days, add_months_clamped};
use crate::error::{RecurrenceError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a scheduled task repeats.
///
/// `None` means a single occurrence. It is a valid form value but has no step,
/// so callers handle it before reaching the expander.
///
/// Serializes as the lowercase name. Deserializes through [`FromStr`], so form
/// JSON accepts the same spellings as the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum RecurrenceFrequency {
    #[default]
    None,
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl RecurrenceFrequency {
    pub const ALL: [RecurrenceFrequency; 5] = [
        RecurrenceFrequency::None,
        RecurrenceFrequency::Daily,
        RecurrenceFrequency::Weekly,
        RecurrenceFrequency::Biweekly,
        RecurrenceFrequency::Monthly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecurrenceFrequency::None => "none",
            RecurrenceFrequency::Daily => "daily",
            RecurrenceFrequency::Weekly => "weekly",
            RecurrenceFrequency::Biweekly => "biweekly",
            RecurrenceFrequency::Monthly => "monthly",
        }
    }

    pub fn is_repeating(self) -> bool {
        self != RecurrenceFrequency::None
    }

    /// The date one step after `date`.
    ///
    /// | frequency | step |
    /// |---|---|
    /// | daily | +1 day |
    /// | weekly | +7 days |
    /// | biweekly | +14 days |
    /// | monthly | +1 month, clamped to the month's last day |
    ///
    /// # Errors
    /// `RecurrenceError::InvalidArgument` for `None`, or when the step leaves
    /// the representable date range.
    pub fn step(self, date: NaiveDate) -> Result<NaiveDate> {
        match self {
            RecurrenceFrequency::None => Err(RecurrenceError::invalid(
                "frequency 'none' has no recurrence step",
            )),
            RecurrenceFrequency::Daily => add_days(date, 1),
            RecurrenceFrequency::Weekly => add_days(date, 7),
            RecurrenceFrequency::Biweekly => add_days(date, 14),
            RecurrenceFrequency::Monthly => add_months_clamped(date, 1),
        }
    }
}

impl fmt::Display for RecurrenceFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecurrenceFrequency {
    type Err = RecurrenceError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(RecurrenceFrequency::None),
            "daily" => Ok(RecurrenceFrequency::Daily),
            "weekly" => Ok(RecurrenceFrequency::Weekly),
            "biweekly" | "bi-weekly" | "fortnightly" => Ok(RecurrenceFrequency::Biweekly),
            "monthly" => Ok(RecurrenceFrequency::Monthly),
            other => Err(RecurrenceError::invalid(format!(
                "unknown frequency '{other}' (expected none, daily, weekly, biweekly or monthly)"
            ))),
        }
    }
}

impl TryFrom<String> for RecurrenceFrequency {
    type Error = RecurrenceError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_aliases_case_insensitively() {
        assert_eq!("Daily".parse::<RecurrenceFrequency>(), Ok(RecurrenceFrequency::Daily));
        assert_eq!(" WEEKLY ".parse::<RecurrenceFrequency>(), Ok(RecurrenceFrequency::Weekly));
        assert_eq!("bi-weekly".parse::<RecurrenceFrequency>(), Ok(RecurrenceFrequency::Biweekly));
        assert_eq!("fortnightly".parse::<RecurrenceFrequency>(), Ok(RecurrenceFrequency::Biweekly));
        assert_eq!("none".parse::<RecurrenceFrequency>(), Ok(RecurrenceFrequency::None));
    }

    #[test]
    fn unknown_frequency_is_invalid_argument() {
        let err = "yearly".parse::<RecurrenceFrequency>().unwrap_err();
        assert!(matches!(err, RecurrenceError::InvalidArgument(ref m) if m.contains("yearly")));
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for freq in RecurrenceFrequency::ALL {
            assert_eq!(freq.to_string().parse::<RecurrenceFrequency>(), Ok(freq));
        }
    }

    #[test]
    fn serde_uses_from_str_spellings() {
        let freq: RecurrenceFrequency = serde_json::from_str(r#"" Bi-Weekly ""#).unwrap();
        assert_eq!(freq, RecurrenceFrequency::Biweekly);
        assert_eq!(
            serde_json::to_string(&RecurrenceFrequency::Biweekly).unwrap(),
            r#""biweekly""#
        );

        let err = serde_json::from_str::<RecurrenceFrequency>(r#""hourly""#).unwrap_err();
        assert!(err.to_string().contains("unknown frequency 'hourly'"), "{err}");
    }

    #[test]
    fn none_has_no_step() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert!(!RecurrenceFrequency::None.is_repeating());
        assert!(RecurrenceFrequency::None.step(date).is_err());
    }

    #[test]
    fn step_sizes() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let days = |f: RecurrenceFrequency| (f.step(date).unwrap() - date).num_days();
        assert_eq!(days(RecurrenceFrequency::Daily), 1);
        assert_eq!(days(RecurrenceFrequency::Weekly), 7);
        assert_eq!(days(RecurrenceFrequency::Biweekly), 14);
        assert_eq!(
            RecurrenceFrequency::Monthly.step(date).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
    }
}
