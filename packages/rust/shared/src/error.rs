//! Error types for goldkey.
//!
//! Library crates use [`GoldkeyError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all goldkey operations.
#[derive(Debug, thiserror::Error)]
pub enum GoldkeyError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// A provider has no credentials or is not configured.
    #[error("provider {provider} unavailable: {reason}")]
    ProviderUnavailable { provider: String, reason: String },

    /// A provider call exceeded its timeout.
    #[error("provider timeout: {0}")]
    ProviderTimeout(String),

    /// Network/HTTP error talking to a provider.
    #[error("provider error: {0}")]
    Provider(String),

    /// Provider payload had an unexpected shape or a suppressed value.
    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error.
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, GoldkeyError>;

impl GoldkeyError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a provider-unavailable error.
    pub fn unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    /// Create a malformed-response error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from a provider call (and should degrade, not abort).
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. }
                | Self::ProviderTimeout(_)
                | Self::Provider(_)
                | Self::MalformedResponse { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = GoldkeyError::config("missing [naver] section");
        assert_eq!(err.to_string(), "config error: missing [naver] section");

        let err = GoldkeyError::unavailable("naver-search", "NAVER_CLIENT_ID is not set");
        assert_eq!(
            err.to_string(),
            "provider naver-search unavailable: NAVER_CLIENT_ID is not set"
        );

        let err = GoldkeyError::malformed("monthlyPcQcCnt was \"< 10\"");
        assert!(err.to_string().contains("< 10"));
    }

    #[test]
    fn provider_failures_are_classified() {
        assert!(GoldkeyError::ProviderTimeout("blog.json".into()).is_provider_failure());
        assert!(GoldkeyError::Provider("HTTP 500".into()).is_provider_failure());
        assert!(GoldkeyError::malformed("no total").is_provider_failure());
        assert!(!GoldkeyError::validation("bad").is_provider_failure());
        assert!(!GoldkeyError::config("bad").is_provider_failure());
    }
}
