//! Ingestion boundary: JSON payload → validated raw records.
//!
//! The filter runs before any scoring:
//! - a payload that is not a JSON array aborts the run;
//! - a record that is not an object, lacks a non-empty string `name`, or
//!   carries a non-numeric value in a numeric field is skipped and counted;
//! - later records repeating an earlier name are dropped (first seen wins)
//!   and counted separately from malformed ones.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::{CrossbenchError, IngestError, Result, UNKNOWN_ORGANIZATION};
use crate::obs;

/// Raw fields that must be numeric (number or numeric string) when present.
pub const NUMERIC_FIELDS: &[&str] = &[
    "gpqa_score",
    "average_score",
    "input_price",
    "coding_score",
    "humaneval",
    "creative_score",
    "context_length",
    "throughput",
    "tokens_per_second",
];

/// Parse a JSON value as a number.
///
/// `Ok(None)` for null or a blank string, `Err(())` for anything that is
/// present but not a finite number.
fn parse_number(value: &Value) -> std::result::Result<Option<f64>, ()> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(Some).ok_or(()),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => match s.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(Some(f)),
            _ => Err(()),
        },
        _ => Err(()),
    }
}

/// One validated upstream record.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    name: String,
    fields: Map<String, Value>,
}

impl RawRecord {
    /// Validate a JSON value. `numeric_fields` are checked in addition to
    /// [`NUMERIC_FIELDS`].
    pub fn parse(
        index: usize,
        value: Value,
        numeric_fields: &[&str],
    ) -> std::result::Result<Self, IngestError> {
        let Value::Object(fields) = value else {
            return Err(IngestError::NotAnObject { index });
        };

        let name = match fields.get("name") {
            Some(Value::String(s)) if !s.trim().is_empty() => s.clone(),
            _ => return Err(IngestError::MissingName { index }),
        };

        for field in NUMERIC_FIELDS.iter().chain(numeric_fields) {
            if let Some(v) = fields.get(*field) {
                if parse_number(v).is_err() {
                    return Err(IngestError::NotNumeric {
                        name,
                        field: (*field).to_string(),
                        value: v.to_string(),
                    });
                }
            }
        }

        Ok(Self { name, fields })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Organization string, `"Unknown"` when absent or not a string.
    pub fn organization(&self) -> &str {
        self.string("organization").unwrap_or(UNKNOWN_ORGANIZATION)
    }

    /// Numeric field value; `None` when absent, null or not numeric.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.fields.get(key).and_then(|v| parse_number(v).ok().flatten())
    }

    pub fn string(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    /// String elements of an array field; non-strings are ignored.
    pub fn string_list(&self, key: &str) -> Option<Vec<&str>> {
        self.fields
            .get(key)
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Value::as_str).collect())
    }

    /// Whether the field exists and is not null.
    pub fn has(&self, key: &str) -> bool {
        self.fields.get(key).is_some_and(|v| !v.is_null())
    }
}

/// Counters produced by the ingestion filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestSummary {
    /// Entries in the payload.
    pub received: usize,
    /// Records that passed the filter.
    pub accepted: usize,
    /// Records skipped as malformed.
    pub malformed: usize,
    /// Repeats of an already accepted name.
    pub duplicates: usize,
}

/// Records that passed the ingestion filter.
#[derive(Debug, Clone, Default)]
pub struct IngestBatch {
    pub records: Vec<RawRecord>,
    pub summary: IngestSummary,
}

/// Decode the payload. Anything but a JSON array is fatal.
pub fn parse_payload(bytes: &[u8]) -> Result<Vec<Value>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| CrossbenchError::InvalidPayload(format!("malformed JSON: {e}")))?;
    match value {
        Value::Array(items) => Ok(items),
        other => Err(CrossbenchError::InvalidPayload(format!(
            "expected a JSON array of records, found {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Validate and de-duplicate raw entries, in order.
pub fn filter_records(items: Vec<Value>, numeric_fields: &[&str]) -> IngestBatch {
    let mut batch = IngestBatch {
        records: Vec::with_capacity(items.len()),
        summary: IngestSummary {
            received: items.len(),
            ..Default::default()
        },
    };
    let mut seen: HashSet<String> = HashSet::new();

    for (index, item) in items.into_iter().enumerate() {
        match RawRecord::parse(index, item, numeric_fields) {
            Ok(record) => {
                if !seen.insert(record.name().to_string()) {
                    batch.summary.duplicates += 1;
                    continue;
                }
                batch.records.push(record);
            }
            Err(err) => {
                obs::emit_record_skipped(&err);
                batch.summary.malformed += 1;
            }
        }
    }

    batch.summary.accepted = batch.records.len();
    batch
}
