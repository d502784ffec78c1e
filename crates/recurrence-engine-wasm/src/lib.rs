//! WASM bindings for recurrence-engine.
//!
//! Exposes occurrence expansion and schedule planning to the browser front end
//! via `wasm-bindgen`. Complex types cross the boundary as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p recurrence-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/recurrence-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/recurrence_engine_wasm.wasm
//! ```

use recurrence_engine::calendar::parse_date;
use recurrence_engine::{
    expand_with_limit, plan_schedule, ExpanderConfig, Occurrence, RecurrenceFrequency,
    SchedulePlan, ScheduleRequest, MAX_OCCURRENCES,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExpansionDto {
    occurrences: Vec<String>,
    capped: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OccurrenceDto {
    date: String,
    time: Option<String>,
    starts_at: Option<String>,
}

impl From<&Occurrence> for OccurrenceDto {
    fn from(o: &Occurrence) -> Self {
        Self {
            date: o.date.to_string(),
            time: o.time.map(|t| t.format("%H:%M:%S").to_string()),
            starts_at: o
                .starts_at()
                .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        }
    }
}

#[derive(Serialize)]
struct PlanDto {
    frequency: RecurrenceFrequency,
    occurrences: Vec<OccurrenceDto>,
}

impl From<&SchedulePlan> for PlanDto {
    fn from(plan: &SchedulePlan) -> Self {
        Self {
            frequency: plan.frequency,
            occurrences: plan.occurrences.iter().map(OccurrenceDto::from).collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// JSON-level implementations, kept free of `JsValue` so they run natively
// ---------------------------------------------------------------------------

fn expand_to_json(
    start: &str,
    until: &str,
    frequency: &str,
    max_occurrences: Option<usize>,
) -> Result<String, String> {
    let start = parse_date(start).map_err(|e| e.to_string())?;
    let until = parse_date(until).map_err(|e| e.to_string())?;
    let frequency = frequency
        .parse::<RecurrenceFrequency>()
        .map_err(|e| e.to_string())?;

    let expansion = expand_with_limit(
        start,
        until,
        frequency,
        max_occurrences.unwrap_or(MAX_OCCURRENCES),
    )
    .map_err(|e| e.to_string())?;

    let dto = ExpansionDto {
        occurrences: expansion.dates().iter().map(|d| d.to_string()).collect(),
        capped: expansion.capped(),
    };
    serde_json::to_string(&dto).map_err(|e| format!("Serialization error: {}", e))
}

fn plan_to_json(request_json: &str, config_json: Option<&str>) -> Result<String, String> {
    let request: ScheduleRequest = serde_json::from_str(request_json)
        .map_err(|e| format!("Invalid schedule request JSON: {}", e))?;
    let config: ExpanderConfig = match config_json {
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Invalid config JSON: {}", e))?
        }
        None => ExpanderConfig::default(),
    };

    let plan = plan_schedule(&request, &config).map_err(|e| e.to_string())?;

    serde_json::to_string(&PlanDto::from(&plan))
        .map_err(|e| format!("Serialization error: {}", e))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Expand a repeating schedule into occurrence dates.
///
/// Returns a JSON string `{"occurrences": ["YYYY-MM-DD", ...], "capped": bool}`.
/// `capped` is true when the occurrence cap stopped the series before `until`.
///
/// # Arguments
/// - `start` -- First occurrence (`YYYY-MM-DD`)
/// - `until` -- Inclusive "repeat until" date (`YYYY-MM-DD`)
/// - `frequency` -- `daily`, `weekly`, `biweekly` or `monthly`
/// - `max_occurrences` -- Optional cap (defaults to 52)
#[wasm_bindgen(js_name = "expandRecurrence")]
pub fn expand_recurrence(
    start: &str,
    until: &str,
    frequency: &str,
    max_occurrences: Option<u32>,
) -> Result<String, JsValue> {
    expand_to_json(
        start,
        until,
        frequency,
        max_occurrences.map(|n| n as usize),
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Validate a scheduling request and return the occurrences to create.
///
/// `request_json` is `{"start", "until", "frequency", "time"}` as posted by the
/// task form; `config_json` optionally overrides `{"max_occurrences"}`. Returns
/// `{"frequency", "occurrences": [{"date", "time", "startsAt"}]}`, or throws
/// when the request is invalid or the range is too long for the frequency.
#[wasm_bindgen(js_name = "planSchedule")]
pub fn plan_schedule_json(
    request_json: &str,
    config_json: Option<String>,
) -> Result<String, JsValue> {
    plan_to_json(request_json, config_json.as_deref()).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_json_shape() {
        let json = expand_to_json("2025-01-01", "2025-01-31", "weekly", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["occurrences"].as_array().unwrap().len(), 5);
        assert_eq!(value["occurrences"][4], "2025-01-29");
        assert_eq!(value["capped"], false);
    }

    #[test]
    fn expand_json_respects_cap() {
        let json = expand_to_json("2025-01-01", "2025-01-31", "daily", Some(4)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["occurrences"].as_array().unwrap().len(), 4);
        assert_eq!(value["capped"], true);
    }

    #[test]
    fn expand_json_rejects_bad_input() {
        assert!(expand_to_json("2025-01-01", "2025-01-31", "hourly", None)
            .unwrap_err()
            .contains("unknown frequency"));
        assert!(expand_to_json("tomorrow", "2025-01-31", "daily", None).is_err());
    }

    #[test]
    fn plan_json_shape() {
        let json = plan_to_json(
            r#"{"start":"2025-01-31","until":"2025-03-31","frequency":"monthly","time":"09:00"}"#,
            None,
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["frequency"], "monthly");
        let occurrences = value["occurrences"].as_array().unwrap();
        assert_eq!(occurrences.len(), 3);
        assert_eq!(occurrences[1]["date"], "2025-02-28");
        assert_eq!(occurrences[1]["startsAt"], "2025-02-28T09:00:00");
    }

    #[test]
    fn plan_json_range_too_long() {
        let err = plan_to_json(
            r#"{"start":"2025-01-01","until":"2025-12-31","frequency":"daily"}"#,
            None,
        )
        .unwrap_err();
        assert!(err.contains("too long"), "{err}");

        let ok = plan_to_json(
            r#"{"start":"2025-01-01","until":"2025-12-31","frequency":"daily"}"#,
            Some(r#"{"max_occurrences":400}"#),
        )
        .unwrap();
        assert!(ok.contains("2025-12-31"));
    }
}
