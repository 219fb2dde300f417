//! Error types for URL inspection and message-log reading.
//!
//! None of the decode errors reach the end user: the URL pipeline recovers
//! from every one of them and keeps the undecoded value instead.

use thiserror::Error;

/// Failure of a single decode attempt.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` was not followed by two hex digits.
    #[error("Malformed percent escape at byte {position}")]
    MalformedEscape {
        /// Byte offset of the offending `%`.
        position: usize,
    },

    /// The decoded bytes are not valid UTF-8.
    #[error("Decoded bytes are not valid UTF-8")]
    InvalidUtf8,

    /// The input is not valid standard base64.
    #[error("Invalid base64: {0}")]
    InvalidBase64(String),
}

impl From<base64::DecodeError> for DecodeError {
    fn from(err: base64::DecodeError) -> Self {
        DecodeError::InvalidBase64(err.to_string())
    }
}

impl From<std::string::FromUtf8Error> for DecodeError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        DecodeError::InvalidUtf8
    }
}

impl From<std::str::Utf8Error> for DecodeError {
    fn from(_: std::str::Utf8Error) -> Self {
        DecodeError::InvalidUtf8
    }
}

/// Errors raised while splitting a URL's authority.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlError {
    /// The port is not a number in `1..=65535`.
    #[error("Malformed port: {0:?}")]
    MalformedPort(String),
}

/// Errors raised while loading a message log.
#[derive(Error, Debug)]
pub enum LogError {
    /// The log file could not be read.
    #[error("Failed to read message log: {0}")]
    Io(#[from] std::io::Error),

    /// The log file is not valid JSON.
    #[error("Invalid message log JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is not an array of objects.
    #[error("Message log must be a JSON array of objects")]
    NotAnArray,

    /// A record lacks a field every message must carry.
    #[error("Message {index} is missing field `{field}`")]
    MissingField {
        /// Position of the record in the file.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// A record's timestamp is not an ISO 8601 date-time.
    #[error("Message {index} has an invalid timestamp {value:?}")]
    Timestamp {
        /// Position of the record in the file.
        index: usize,
        /// The rejected timestamp text.
        value: String,
    },
}
