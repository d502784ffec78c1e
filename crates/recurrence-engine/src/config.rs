//! Expansion limits.

use crate::error::{RecurrenceError, Result};
use crate::expander::MAX_OCCURRENCES;
use serde::{Deserialize, Serialize};

/// Limits applied when expanding a schedule.
///
/// Deserializes from a partial object; missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpanderConfig {
    /// Hard ceiling on the number of dates in one series, start included.
    pub max_occurrences: usize,
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self {
            max_occurrences: MAX_OCCURRENCES,
        }
    }
}

impl ExpanderConfig {
    pub fn with_max_occurrences(max_occurrences: usize) -> Self {
        Self { max_occurrences }
    }

    /// # Errors
    /// `RecurrenceError::InvalidArgument` when `max_occurrences` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_occurrences == 0 {
            return Err(RecurrenceError::invalid("max_occurrences must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cap_is_fifty_two() {
        assert_eq!(ExpanderConfig::default().max_occurrences, 52);
        assert!(ExpanderConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_cap_rejected() {
        assert!(ExpanderConfig::with_max_occurrences(0).validate().is_err());
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: ExpanderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ExpanderConfig::default());

        let config: ExpanderConfig = serde_json::from_str(r#"{"max_occurrences":10}"#).unwrap();
        assert_eq!(config.max_occurrences, 10);
    }
}
