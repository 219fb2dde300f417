//! Query-string decoding.
//!
//! Splits a raw query into keys and values, groups repeated keys, and tries
//! a base64 decode on the first value of every key.

use indexmap::IndexMap;
use url::form_urlencoded;

use crate::core::heuristics::decode_base64_best_effort;
use crate::types::{DecodedQuery, DecodedValue, QueryValue};

/// Split a raw query string into groups of values keyed by name.
///
/// Keys and values are form-decoded (`+` is a space). Groups are ordered by
/// the first appearance of each key; values keep their original order. A key
/// without `=` gets an empty value.
///
/// # Examples
///
/// ```
/// use urlinspect::split_query;
///
/// let groups = split_query("b=2&a=1&b=3&flag");
/// assert_eq!(groups.keys().collect::<Vec<_>>(), vec!["b", "a", "flag"]);
/// assert_eq!(groups["b"], vec!["2".to_string(), "3".to_string()]);
/// assert_eq!(groups["flag"], vec![String::new()]);
/// ```
pub fn split_query(query: &str) -> IndexMap<String, Vec<String>> {
    let mut groups: IndexMap<String, Vec<String>> = IndexMap::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        groups
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    groups
}

/// Decode a raw query string into an ordered key → [`QueryValue`] mapping.
///
/// Only the first value of a repeated key is tried as base64. When it
/// decodes, the key collapses to that scalar and the other values remain
/// visible only through `raw_values`.
///
/// # Examples
///
/// ```
/// use urlinspect::{decode_query, DecodedValue};
///
/// let query = decode_query("y=aGVsbG8%3D&x=1&x=2");
/// assert_eq!(query.get("y").unwrap().decoded, DecodedValue::DecodedScalar("hello".to_string()));
/// assert_eq!(
///     query.get("x").unwrap().decoded,
///     DecodedValue::PlainList(vec!["1".to_string(), "2".to_string()])
/// );
/// ```
pub fn decode_query(query: &str) -> DecodedQuery {
    split_query(query)
        .into_iter()
        .map(|(key, raw_values)| {
            let value = decode_values(&key, raw_values);
            (key, value)
        })
        .collect()
}

fn decode_values(key: &str, raw_values: Vec<String>) -> QueryValue {
    let first = raw_values.first().map(String::as_str).unwrap_or_default();

    let decoded = match decode_base64_best_effort(first) {
        Ok(text) => {
            if raw_values.len() > 1 {
                tracing::debug!(
                    key,
                    dropped = raw_values.len() - 1,
                    "base64 key collapsed to its first value"
                );
            }
            DecodedValue::DecodedScalar(text)
        }
        Err(err) => {
            tracing::debug!(key, %err, "query value kept undecoded");
            DecodedValue::PlainList(raw_values.clone())
        }
    };

    QueryValue { raw_values, decoded }
}
