//! A single chat record.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::LogError;

/// Formats accepted for timestamps without a UTC offset.
const NAIVE_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Format used when printing a message.
const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One record of a message log.
///
/// Records have no fixed shape, so the original JSON object is kept as an
/// ordered map. Only the timestamp is required and parsed up front.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    fields: Map<String, Value>,
    timestamp: NaiveDateTime,
}

impl Message {
    /// Build a message from the `index`-th JSON record of a log.
    pub fn from_value(index: usize, value: Value) -> Result<Self, LogError> {
        let fields = match value {
            Value::Object(fields) => fields,
            _ => return Err(LogError::NotAnArray),
        };

        let raw = fields
            .get("timestamp")
            .and_then(Value::as_str)
            .ok_or(LogError::MissingField {
                index,
                field: "timestamp",
            })?;
        let timestamp = parse_timestamp(raw).ok_or_else(|| LogError::Timestamp {
            index,
            value: raw.to_string(),
        })?;

        Ok(Self { fields, timestamp })
    }

    /// Wall-clock time of the message in its own offset.
    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// The author's user name, if recorded.
    pub fn author(&self) -> Option<&str> {
        self.fields
            .get("author")
            .and_then(|author| author.get("username"))
            .and_then(Value::as_str)
    }

    /// Message text; empty when absent.
    pub fn content(&self) -> &str {
        self.get("content").and_then(Value::as_str).unwrap_or_default()
    }

    /// File names of all attachments, in order.
    pub fn attachments(&self) -> Vec<&str> {
        self.get("attachments")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| item.get("filename").and_then(Value::as_str))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Any field of the original record.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The original record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t\"{}\"\t{}",
            self.timestamp.format(DISPLAY_FORMAT),
            self.author().unwrap_or_default(),
            self.content(),
            self.attachments().join(", ")
        )
    }
}

/// Parse an ISO 8601 timestamp, keeping the local wall-clock time.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z") {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}
