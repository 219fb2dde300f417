//! Aligned text reports of parsed URLs.
//!
//! A [`Report`] borrows a [`ParsedUrl`] and its [`DecodedQuery`] and yields
//! one `label: value` line per component, per query key and per nested JSON
//! field. Lines are produced lazily and can be produced again at any time.

use std::fmt;
use std::io::{self, Write};

use crate::core::heuristics::unquote_best_effort;
use crate::core::payload::json_fields;
use crate::types::{Component, DecodedQuery, DecodedValue, ParsedUrl, QueryValue};

/// Components shown before the query keys, in display order.
const COMPONENT_ROWS: [Component; 9] = [
    Component::Scheme,
    Component::NetworkLocation,
    Component::Username,
    Component::Hostname,
    Component::Port,
    Component::Password,
    Component::Path,
    Component::Parameters,
    Component::Query,
];

/// Layout settings for a [`Report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Width of top-level labels
    pub label_width: usize,
    /// Width of labels after the indent
    pub indented_label_width: usize,
    /// Prefix of indented lines
    pub indent: String,
    /// Characters kept from long values
    pub truncate_at: usize,
    /// Appended to every non-empty truncated value
    pub truncation_marker: String,
    /// Shown when the fragment is empty
    pub missing_fragment: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            label_width: 25,
            indented_label_width: 23,
            indent: "  ".to_string(),
            truncate_at: 50,
            truncation_marker: "[...]".to_string(),
            missing_fragment: "None".to_string(),
        }
    }
}

/// A renderable view of one URL and its decoded query.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    parsed: &'a ParsedUrl,
    query: &'a DecodedQuery,
    config: RenderConfig,
}

/// Build a report with the default layout.
///
/// # Examples
///
/// ```
/// use urlinspect::{decode_query, parse, render};
///
/// let url = parse("https://example.com/docs?page=2#intro%20text");
/// let query = decode_query(&url.query);
/// let report = render(&url, &query);
///
/// let lines: Vec<String> = report.lines().collect();
/// assert_eq!(lines[0], format!("{:<25}: https", "Scheme"));
/// assert_eq!(lines.last().unwrap(), &format!("{:<25}: intro text", "Fragment"));
/// ```
pub fn render<'a>(parsed: &'a ParsedUrl, query: &'a DecodedQuery) -> Report<'a> {
    render_with(parsed, query, RenderConfig::default())
}

/// Build a report with a custom layout.
pub fn render_with<'a>(
    parsed: &'a ParsedUrl,
    query: &'a DecodedQuery,
    config: RenderConfig,
) -> Report<'a> {
    Report {
        parsed,
        query,
        config,
    }
}

impl<'a> Report<'a> {
    /// Lazily yield the report's lines, without trailing newlines.
    pub fn lines(&self) -> Box<dyn Iterator<Item = String> + '_> {
        let components = COMPONENT_ROWS
            .into_iter()
            .map(move |component| self.component_line(component));
        let keys = self
            .query
            .iter()
            .flat_map(move |(key, value)| self.query_lines(key, value));
        let fragment = std::iter::once_with(move || self.fragment_line());

        Box::new(components.chain(keys).chain(fragment))
    }

    /// Write every line to `out`, each followed by a newline.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    fn component_line(&self, component: Component) -> String {
        let mut value = self.parsed.component(component).unwrap_or_default();
        if component == Component::Query {
            value = self.truncate(&value);
        }

        if component.is_authority_part() {
            self.indented_line(component.label(), &value)
        } else {
            self.top_line(component.label(), &value)
        }
    }

    fn query_lines(&self, key: &str, value: &QueryValue) -> Vec<String> {
        let label = single_line(key);
        match &value.decoded {
            DecodedValue::PlainList(values) => {
                vec![self.indented_line(&label, &single_line(&values.join(", ")))]
            }
            DecodedValue::DecodedScalar(scalar) => {
                let shown = single_line(&self.truncate(scalar));
                let mut lines = vec![self.indented_line(&label, &shown)];
                if let Some(fields) = json_fields(scalar) {
                    lines.extend(fields.iter().map(|(field, text)| {
                        self.top_line("", &single_line(&format!("{}: {}", field, text)))
                    }));
                }
                lines
            }
        }
    }

    fn fragment_line(&self) -> String {
        let fragment = unquote_best_effort(self.parsed.fragment.as_deref().unwrap_or_default());
        let shown = if fragment.is_empty() {
            self.config.missing_fragment.as_str()
        } else {
            fragment.as_str()
        };
        self.top_line(Component::Fragment.label(), shown)
    }

    fn top_line(&self, label: &str, value: &str) -> String {
        format!("{:<width$}: {}", label, value, width = self.config.label_width)
    }

    fn indented_line(&self, label: &str, value: &str) -> String {
        format!(
            "{}{:<width$}: {}",
            self.config.indent,
            label,
            value,
            width = self.config.indented_label_width
        )
    }

    fn truncate(&self, value: &str) -> String {
        if value.is_empty() {
            return String::new();
        }
        let kept: String = value.chars().take(self.config.truncate_at).collect();
        format!("{}{}", kept, self.config.truncation_marker)
    }
}

/// Escape control characters so decoded text stays on one report line.
fn single_line(text: &str) -> String {
    if !text.chars().any(char::is_control) {
        return text.to_string();
    }
    text.chars()
        .flat_map(|c| {
            let escaped: Vec<char> = if c.is_control() {
                c.escape_default().collect()
            } else {
                vec![c]
            };
            escaped
        })
        .collect()
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(&line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::decode_query;
    use crate::url::parser::parse;

    fn lines_for(raw: &str) -> Vec<String> {
        let parsed = parse(raw);
        let query = decode_query(&parsed.query);
        let lines = render(&parsed, &query).lines().collect();
        lines
    }

    fn value_of(line: &str) -> &str {
        line.split_once(": ").map(|(_, v)| v).unwrap_or_default()
    }

    #[test]
    fn test_render_component_order() {
        let lines = lines_for("https://u:p@h:1/x;y?a=1#f");
        let labels: Vec<&str> = lines
            .iter()
            .map(|l| l.split_once(':').unwrap().0.trim())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Scheme",
                "Network Location",
                "Username",
                "Hostname",
                "Port",
                "Password",
                "Path",
                "Parameters",
                "Query",
                "a",
                "Fragment",
            ]
        );
    }

    #[test]
    fn test_render_indentation() {
        let lines = lines_for("https://u:p@h:1/");
        assert!(lines[0].starts_with("Scheme "));
        assert!(lines[2].starts_with("  Username "));
        assert_eq!(lines[2].find(':'), Some(25));
        assert_eq!(lines[0].find(':'), Some(25));
    }

    #[test]
    fn test_render_absent_values_empty() {
        let lines = lines_for("relative");
        assert_eq!(value_of(&lines[0]), "");
        assert_eq!(value_of(&lines[4]), "");
        assert_eq!(value_of(&lines[6]), "relative");
        assert_eq!(value_of(&lines[8]), "");
    }

    #[test]
    fn test_render_query_truncated() {
        let long = "q=".to_string() + &"a".repeat(60);
        let lines = lines_for(&format!("http://h/?{}", long));
        let expected = format!("{}[...]", &long[..50]);
        assert_eq!(value_of(&lines[8]), expected);

        let lines = lines_for("http://h/?a=1");
        assert_eq!(value_of(&lines[8]), "a=1[...]");
    }

    #[test]
    fn test_render_plain_list_joined() {
        let lines = lines_for("http://h/?x=1&x=2&x=3");
        assert_eq!(lines[9], format!("  {:<23}: 1, 2, 3", "x"));
    }

    #[test]
    fn test_render_scalar_with_json_fields() {
        // {"a":"line1\nline2","b":2}
        let lines = lines_for("http://h/?d=eyJhIjoibGluZTFcbmxpbmUyIiwiYiI6Mn0%3D");
        assert_eq!(value_of(&lines[9]), r#"{"a":"line1\nline2","b":2}[...]"#);
        assert_eq!(lines[10], format!("{:<25}: a: line1; line2", ""));
        assert_eq!(lines[11], format!("{:<25}: b: 2", ""));
        assert!(lines[12].starts_with("Fragment"));
    }

    #[test]
    fn test_render_scalar_without_json() {
        let lines = lines_for("http://h/?y=aGVsbG8%3D");
        assert_eq!(value_of(&lines[9]), "hello[...]");
        assert!(lines[10].starts_with("Fragment"));
    }

    #[test]
    fn test_render_control_characters_escaped() {
        // key "a\nb", value "x\ty", then base64 of "one\ntwo"
        let lines = lines_for("http://h/?a%0Ab=x%09y&s=b25lCnR3bw%3D%3D");
        assert_eq!(lines.len(), 12);
        assert_eq!(lines[9], format!("  {:<23}: x\\ty", "a\\nb"));
        assert_eq!(value_of(&lines[10]), "one\\ntwo[...]");
        assert!(lines[11].starts_with("Fragment"));
        assert!(lines.iter().all(|l| !l.contains('\n') && !l.contains('\t')));
    }

    #[test]
    fn test_render_fragment() {
        let lines = lines_for("http://h/");
        assert_eq!(value_of(lines.last().unwrap()), "None");

        let lines = lines_for("http://h/#a%2520b");
        assert_eq!(value_of(lines.last().unwrap()), "a b");
    }

    #[test]
    fn test_render_is_restartable() {
        let parsed = parse("https://h/p?x=1&y=aGk%3D#z");
        let query = decode_query(&parsed.query);
        let report = render(&parsed, &query);

        let first: Vec<String> = report.lines().collect();
        let second: Vec<String> = report.lines().collect();
        assert_eq!(first, second);
        assert_eq!(report.to_string(), first.join("\n"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_to() {
        let parsed = parse("https://h/p?x=1#z");
        let query = decode_query(&parsed.query);
        let report = render(&parsed, &query);

        let mut out = Vec::new();
        report.write_to(&mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", report));

        let err = report.write_to(&mut ClosedPipe).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[test]
    fn test_render_custom_config() {
        let parsed = parse("http://h/?q=abcdef");
        let query = decode_query(&parsed.query);
        let config = RenderConfig {
            label_width: 8,
            indented_label_width: 6,
            truncate_at: 3,
            truncation_marker: "~".to_string(),
            missing_fragment: "-".to_string(),
            ..RenderConfig::default()
        };
        let lines: Vec<String> = render_with(&parsed, &query, config).lines().collect();
        assert_eq!(lines[0], "Scheme  : http");
        assert_eq!(lines[8], "Query   : q=a~");
        assert_eq!(lines.last().unwrap(), "Fragment: -");
    }
}
