//! Core data structures for URL inspection.

use std::fmt;

use indexmap::IndexMap;

/// A URL split into its structural components.
///
/// Every field is derived from `raw` alone, so parsing the same string twice
/// yields equal values. Components missing from the URL are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedUrl {
    /// The URL exactly as given
    pub raw: String,
    /// Lowercased scheme (https, mailto, ...)
    pub scheme: Option<String>,
    /// Everything between `//` and the path (user:pass@host:port)
    pub netlocation: Option<String>,
    /// Lowercased host without brackets or port
    pub hostname: Option<String>,
    /// User name from the authority
    pub username: Option<String>,
    /// Password from the authority
    pub password: Option<String>,
    /// Port number, absent when missing or malformed
    pub port: Option<u16>,
    /// Path component (/api/v1/users)
    pub path: Option<String>,
    /// `;`-parameters of the last path segment
    pub parameters: Option<String>,
    /// Raw query string without the '?' (foo=bar&baz=qux)
    pub query: String,
    /// Fragment without the '#'
    pub fragment: Option<String>,
}

impl ParsedUrl {
    /// Length of the raw URL in bytes.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Check if the raw URL is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Return one component rendered as text, or `None` when absent.
    pub fn component(&self, component: Component) -> Option<String> {
        match component {
            Component::Scheme => self.scheme.clone(),
            Component::NetworkLocation => self.netlocation.clone(),
            Component::Username => self.username.clone(),
            Component::Hostname => self.hostname.clone(),
            Component::Port => self.port.map(|p| p.to_string()),
            Component::Password => self.password.clone(),
            Component::Path => self.path.clone(),
            Component::Parameters => self.parameters.clone(),
            Component::Query => Some(self.query.clone()).filter(|q| !q.is_empty()),
            Component::Fragment => self.fragment.clone(),
        }
    }

    /// Decode this URL's query string.
    pub fn decode_query(&self) -> DecodedQuery {
        crate::core::query::decode_query(&self.query)
    }

    /// Best-effort unquote of any string, as applied to the fragment.
    pub fn unquote(&self, value: &str) -> String {
        crate::core::heuristics::unquote_best_effort(value)
    }
}

impl fmt::Display for ParsedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Names of the components a [`ParsedUrl`] exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// URL scheme (https, ftp)
    Scheme,
    /// Full authority (user:pass@host:8080)
    NetworkLocation,
    /// User name
    Username,
    /// Host name
    Hostname,
    /// Port number
    Port,
    /// Password
    Password,
    /// Path (/a/b)
    Path,
    /// Path parameters (after `;`)
    Parameters,
    /// Raw query string
    Query,
    /// Fragment
    Fragment,
}

impl Component {
    /// Human-readable label used in reports.
    pub fn label(self) -> &'static str {
        match self {
            Component::Scheme => "Scheme",
            Component::NetworkLocation => "Network Location",
            Component::Username => "Username",
            Component::Hostname => "Hostname",
            Component::Port => "Port",
            Component::Password => "Password",
            Component::Path => "Path",
            Component::Parameters => "Parameters",
            Component::Query => "Query",
            Component::Fragment => "Fragment",
        }
    }

    /// Whether the component belongs to the authority and is shown indented.
    pub fn is_authority_part(self) -> bool {
        matches!(
            self,
            Component::Username | Component::Hostname | Component::Port | Component::Password
        )
    }
}

/// Decoded view of one query key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedValue {
    /// The first value was not base64; all raw values are kept.
    PlainList(Vec<String>),
    /// The first value decoded as base64 text.
    DecodedScalar(String),
}

/// All values of one query key plus their decoded view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryValue {
    /// Every value given for the key, in order of appearance
    pub raw_values: Vec<String>,
    /// Result of the base64 attempt on the first value
    pub decoded: DecodedValue,
}

/// Query keys mapped to their values, in first-occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedQuery {
    entries: IndexMap<String, QueryValue>,
}

impl DecodedQuery {
    /// Look up a key.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    /// Keys in first-occurrence order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(key, value)` pairs in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the query had no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, QueryValue)> for DecodedQuery {
    /// Later values of a repeated key replace earlier ones but keep its position.
    fn from_iter<I: IntoIterator<Item = (String, QueryValue)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DecodedQuery {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = indexmap::map::Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
