//! Caller-supplied report filters
//!
//! Filters are an opaque key/value mapping attached to a report request. The
//! service stores them verbatim on the `Report` row; only the data provider
//! interprets them, and unknown keys are ignored there.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

/// Opaque filter mapping for a report request
///
/// Keys are filter names (`active`, `status`, `patient_id`, ...), values are
/// arbitrary JSON. A `BTreeMap` keeps iteration order stable so rendered
/// filter summaries and JSON output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportFilters(BTreeMap<String, Value>);

impl ReportFilters {
    /// Creates an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a filter value, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns true if no filters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value lookup
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value for a key
    ///
    /// Non-string JSON values are rendered through their canonical display
    /// form, so `{"status": "booked"}` and `--filter status=booked` behave
    /// identically.
    pub fn get_str(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Boolean value for a key
    ///
    /// Accepts JSON booleans as well as `"true"` / `"false"` strings, which
    /// is what the CLI's `--filter active=true` produces.
    pub fn get_bool(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.to_lowercase().as_str() {
                "true" | "1" | "yes" => Some(true),
                "false" | "0" | "no" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    /// Date value (`YYYY-MM-DD`) for a key
    pub fn get_date(&self, key: &str) -> Option<NaiveDate> {
        let s = self.get_str(key)?;
        NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()
    }

    /// Timestamp value for a key
    ///
    /// Accepts RFC 3339 timestamps or bare dates (interpreted as midnight UTC).
    pub fn get_datetime(&self, key: &str) -> Option<DateTime<Utc>> {
        let s = self.get_str(key)?;
        if let Ok(dt) = DateTime::parse_from_rfc3339(&s) {
            return Some(dt.with_timezone(&Utc));
        }
        let date = NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok()?;
        Some(DateTime::from_naive_utc_and_offset(
            date.and_hms_opt(0, 0, 0)?,
            Utc,
        ))
    }

    /// UUID value for a key
    pub fn get_uuid(&self, key: &str) -> Option<Uuid> {
        let s = self.get_str(key)?;
        Uuid::parse_str(&s).ok()
    }

    /// Iterates over the filter entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Human-readable one-line summary for report headers
    ///
    /// Null and empty values are skipped. Returns `"None"` when nothing
    /// remains, matching the display convention of the rendered reports.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = self
            .0
            .iter()
            .filter_map(|(key, value)| {
                let rendered = match value {
                    Value::Null => return None,
                    Value::String(s) if s.is_empty() => return None,
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                Some(format!("{}: {rendered}", display_key(key)))
            })
            .collect();

        if parts.is_empty() {
            "None".to_string()
        } else {
            parts.join(", ")
        }
    }

    /// Converts to a JSON value for persistence
    pub fn to_value(&self) -> Value {
        Value::Object(
            self.0
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }

    /// Builds filters from a persisted JSON value
    ///
    /// Non-object values yield an empty filter set.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map.into_iter().collect()),
            _ => Self::default(),
        }
    }
}

/// Titlecases a snake_case filter key for display (`patient_id` -> `Patient Id`)
fn display_key(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
