//! Blocking HTTP plumbing shared by the provider adapters.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use tracing::debug;
use url::Url;

use goldkey_shared::{GoldkeyError, Result};

/// User-Agent string for provider requests.
pub(crate) const USER_AGENT: &str = concat!("goldkey/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects followed per request.
const MAX_REDIRECTS: usize = 3;

/// Build a blocking client with the crate's user agent and the given timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .timeout(timeout)
        .build()
        .map_err(|e| GoldkeyError::Provider(format!("failed to build HTTP client: {e}")))
}

/// Parse a configured base URL so that relative endpoints join beneath it.
pub(crate) fn parse_base_url(base: &str) -> Result<Url> {
    let with_slash = if base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}/")
    };
    Url::parse(&with_slash).map_err(|e| GoldkeyError::config(format!("invalid base URL '{base}': {e}")))
}

/// Resolve `path` against a base URL.
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .map_err(|e| GoldkeyError::config(format!("invalid endpoint {base}{path}: {e}")))
}

/// Map a transport error onto the provider error taxonomy.
pub(crate) fn request_error(context: &str, e: reqwest::Error) -> GoldkeyError {
    if e.is_timeout() {
        GoldkeyError::ProviderTimeout(format!("{context}: {e}"))
    } else {
        GoldkeyError::Provider(format!("{context}: {e}"))
    }
}

/// Send a request and decode a JSON body, rejecting non-2xx statuses.
pub(crate) fn send_json(context: &str, request: RequestBuilder) -> Result<Value> {
    let response = request.send().map_err(|e| request_error(context, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoldkeyError::Provider(format!("{context}: HTTP {status}")));
    }

    response.json::<Value>().map_err(|e| {
        if e.is_timeout() {
            GoldkeyError::ProviderTimeout(format!("{context}: {e}"))
        } else {
            GoldkeyError::malformed(format!("{context}: invalid JSON body: {e}"))
        }
    })
}

/// Send a request and return the body as text, rejecting non-2xx statuses.
pub(crate) fn send_text(context: &str, request: RequestBuilder) -> Result<String> {
    let response = request.send().map_err(|e| request_error(context, e))?;

    let status = response.status();
    if !status.is_success() {
        return Err(GoldkeyError::Provider(format!("{context}: HTTP {status}")));
    }

    response.text().map_err(|e| request_error(context, e))
}

// ---------------------------------------------------------------------------
// Count parsing
// ---------------------------------------------------------------------------

/// A count as reported by a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Count {
    Exact(u64),
    /// Placeholder such as `"< 10"` standing in for a small count.
    Suppressed,
}

impl Count {
    /// Suppressed counts read as zero.
    pub fn or_zero(self) -> u64 {
        match self {
            Self::Exact(n) => n,
            Self::Suppressed => 0,
        }
    }
}

/// Leniently parse a count: JSON numbers, numeric strings (commas allowed),
/// or a `<`-prefixed suppressed marker. Anything else is `None`.
pub fn parse_count(value: &Value) -> Option<Count> {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_u64() {
                Some(Count::Exact(v))
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| Count::Exact(f as u64))
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.starts_with('<') {
                debug!(raw = %trimmed, "suppressed count marker");
                return Some(Count::Suppressed);
            }
            trimmed.replace(',', "").parse::<u64>().ok().map(Count::Exact)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_numbers_and_numeric_strings() {
        assert_eq!(parse_count(&json!(1200)), Some(Count::Exact(1200)));
        assert_eq!(parse_count(&json!("35,400")), Some(Count::Exact(35_400)));
        assert_eq!(parse_count(&json!(" 17 ")), Some(Count::Exact(17)));
        assert_eq!(parse_count(&json!(42.0)), Some(Count::Exact(42)));
    }

    #[test]
    fn recognizes_suppressed_marker() {
        assert_eq!(parse_count(&json!("< 10")), Some(Count::Suppressed));
        assert_eq!(parse_count(&json!("<10")), Some(Count::Suppressed));
        assert_eq!(Count::Suppressed.or_zero(), 0);
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_count(&json!("n/a")), None);
        assert_eq!(parse_count(&json!(-3)), None);
        assert_eq!(parse_count(&json!(null)), None);
        assert_eq!(parse_count(&json!({"total": 3})), None);
    }

    #[test]
    fn base_url_gets_trailing_slash() {
        let base = parse_base_url("http://localhost:9000/api").expect("parse");
        let url = endpoint(&base, "v1/search/blog.json").expect("join");
        assert_eq!(url.as_str(), "http://localhost:9000/api/v1/search/blog.json");
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, GoldkeyError::Config { .. }));
    }
}
