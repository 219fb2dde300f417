//! Nested JSON payloads inside decoded query values.

use serde_json::Value;

/// Flatten a JSON object into single-line `(field, value)` pairs.
///
/// Returns `None` unless `text` is a JSON object. String values are used
/// as-is, everything else is serialized back to JSON. Newlines become `"; "`
/// so each pair fits on one line. Field order follows the document.
///
/// # Examples
///
/// ```
/// use urlinspect::json_fields;
///
/// let fields = json_fields(r#"{"a":"line1\nline2","n":3}"#).unwrap();
/// assert_eq!(fields[0], ("a".to_string(), "line1; line2".to_string()));
/// assert_eq!(fields[1], ("n".to_string(), "3".to_string()));
///
/// assert!(json_fields("[1, 2]").is_none());
/// assert!(json_fields("not json").is_none());
/// ```
pub fn json_fields(text: &str) -> Option<Vec<(String, String)>> {
    let object = match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => object,
        Ok(_) => return None,
        Err(err) => {
            tracing::trace!(%err, "decoded value is not JSON");
            return None;
        }
    };

    let fields = object
        .into_iter()
        .map(|(field, value)| {
            let text = match value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            (field, collapse_newlines(&text))
        })
        .collect();

    Some(fields)
}

fn collapse_newlines(text: &str) -> String {
    text.replace('\n', "; ")
}
