//! Optional structural check of extracted events.
//!
//! Off by default. When enabled, records that do not match the expected
//! shape are dropped from the result; a search never fails because of it.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use validator::{Validate, ValidationError};

use crate::models::{EventRecord, VibeTag};

/// Typed view of an event used only for validation.
#[derive(Debug, Deserialize, Validate)]
pub struct EventSchema {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub venue_name: String,
    #[validate(custom(function = "validate_iso8601"))]
    pub date: String,
    #[serde(default)]
    #[validate(custom(function = "validate_iso8601"))]
    pub end_time: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub editorial: Option<String>,
    #[serde(default)]
    pub vibe_tags: Vec<VibeTag>,
    #[serde(default)]
    #[validate(nested)]
    pub sources: Vec<Source>,
    #[serde(default)]
    pub recurring: Option<bool>,
    #[serde(default)]
    pub editorial_pick: Option<bool>,
    #[serde(default)]
    pub trusted_platform: Option<bool>,
    #[serde(default)]
    pub solo: Option<bool>,
    #[serde(default)]
    pub coffee_tip: Option<String>,
    #[serde(default)]
    pub late_night_tip: Option<String>,
}

/// Where an event was found.
#[derive(Debug, Deserialize, Validate)]
pub struct Source {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(url)]
    pub url: String,
}

fn validate_iso8601(value: &str) -> Result<(), ValidationError> {
    if is_iso8601(value) {
        Ok(())
    } else {
        Err(ValidationError::new("iso8601"))
    }
}

/// Accepts RFC 3339 timestamps, naive date-times and plain dates.
pub fn is_iso8601(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

/// Check one record, returning a description of the first problem.
pub fn check(record: &EventRecord) -> Result<(), String> {
    let schema: EventSchema = serde_json::from_value(Value::Object(record.as_map().clone()))
        .map_err(|e| e.to_string())?;
    schema.validate().map_err(|e| e.to_string())
}

/// Keep only records that pass [`check`].
pub fn retain_valid(events: Vec<EventRecord>) -> Vec<EventRecord> {
    events
        .into_iter()
        .filter(|record| match check(record) {
            Ok(()) => true,
            Err(reason) => {
                warn!(
                    "Dropping event {:?}: {}",
                    record.title().unwrap_or("<untitled>"),
                    reason
                );
                false
            }
        })
        .collect()
}
