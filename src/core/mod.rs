//! Value-level decoding.
//!
//! This module contains the decoding side of URL inspection:
//! - Best-effort percent and base64 decoding
//! - Query-string grouping and per-key decoding
//! - Detection of JSON payloads inside decoded values

pub mod heuristics;
pub mod payload;
pub mod query;

// Re-export main functionality
pub use heuristics::{
    decode_base64_best_effort, percent_decode_strict, plus_decode, unquote_best_effort,
};
pub use payload::json_fields;
pub use query::{decode_query, split_query};
