//! Splitting of the `user:pass@host:port` authority.

use crate::error::UrlError;

/// The parts of a network location.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Authority {
    /// User name before the `:` of the user info
    pub username: Option<String>,
    /// Password after the `:` of the user info
    pub password: Option<String>,
    /// Lowercased host, brackets removed from IPv6 literals
    pub hostname: Option<String>,
    /// Port, absent when missing or malformed
    pub port: Option<u16>,
}

impl Authority {
    /// Split a network location into its parts.
    ///
    /// The user info ends at the last `@`. A malformed port is dropped
    /// rather than reported.
    ///
    /// # Examples
    ///
    /// ```
    /// use urlinspect::Authority;
    ///
    /// let auth = Authority::parse("user:pass@Example.COM:8080");
    /// assert_eq!(auth.username.as_deref(), Some("user"));
    /// assert_eq!(auth.password.as_deref(), Some("pass"));
    /// assert_eq!(auth.hostname.as_deref(), Some("example.com"));
    /// assert_eq!(auth.port, Some(8080));
    ///
    /// assert_eq!(Authority::parse("host:http").port, None);
    /// ```
    pub fn parse(netloc: &str) -> Self {
        let (userinfo, hostinfo) = match netloc.rsplit_once('@') {
            Some((userinfo, hostinfo)) => (Some(userinfo), hostinfo),
            None => (None, netloc),
        };

        let (username, password) = match userinfo {
            Some(info) => match info.split_once(':') {
                Some((user, pass)) => (non_empty(user), non_empty(pass)),
                None => (non_empty(info), None),
            },
            None => (None, None),
        };

        let (host, port_text) = split_host_port(hostinfo);
        let port = parse_port(port_text).unwrap_or_else(|err| {
            tracing::debug!(%err, netloc, "dropping port");
            None
        });

        Self {
            username,
            password,
            hostname: non_empty(&host.to_lowercase()),
            port,
        }
    }
}

/// Parse the text after the host's `:`.
///
/// Empty text means no port. Anything other than ASCII digits forming a
/// number in `1..=65535` is [`UrlError::MalformedPort`].
///
/// # Examples
///
/// ```
/// use urlinspect::parse_port;
///
/// assert_eq!(parse_port("443").unwrap(), Some(443));
/// assert_eq!(parse_port("").unwrap(), None);
/// assert!(parse_port("99999").is_err());
/// assert!(parse_port("0").is_err());
/// ```
pub fn parse_port(text: &str) -> Result<Option<u16>, UrlError> {
    if text.is_empty() {
        return Ok(None);
    }

    let malformed = || UrlError::MalformedPort(text.to_string());
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    match text.parse::<u16>() {
        Ok(0) | Err(_) => Err(malformed()),
        Ok(port) => Ok(Some(port)),
    }
}

/// Split host info into host and port text.
fn split_host_port(hostinfo: &str) -> (&str, &str) {
    if let Some(bracketed) = hostinfo.split_once('[').map(|(_, b)| b) {
        if let Some((host, after)) = bracketed.split_once(']') {
            let port = after.split_once(':').map(|(_, p)| p).unwrap_or_default();
            return (host, port);
        }
    }

    hostinfo.split_once(':').unwrap_or((hostinfo, ""))
}

fn non_empty(text: &str) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}
