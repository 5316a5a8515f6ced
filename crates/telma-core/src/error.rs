//! Error types and handling for telma-core operations.
//!
//! One error type covers every failure the core library can report: talking
//! to the remote recipe API, reading and writing the saved-recipes file, and
//! loading configuration. Errors carry a category string for logging and a
//! recoverability hint.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: file system access for the saved-recipes file and config
//! - **Network Errors**: HTTP requests to the recipe API, non-success statuses
//! - **Storage Errors**: the key-value store and individual corrupt records
//! - **Configuration Errors**: missing credentials, malformed config files
//!
//! ```rust
//! use telma_core::Error;
//!
//! let err = Error::Timeout("recipe search".to_string());
//! assert!(err.is_recoverable());
//! assert_eq!(err.category(), "timeout");
//! ```

use thiserror::Error;

/// The main error type for telma-core operations.
///
/// All public functions in telma-core return `Result<T, Error>`. Conversions
/// from `std::io::Error`, `reqwest::Error`, `serde_json::Error` and the `toml`
/// errors are provided so `?` works across the crate.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network operation failed.
    ///
    /// Covers connection failures and non-success HTTP statuses other than
    /// 404 returned by the recipe API.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A request exceeded its configured timeout.
    ///
    /// Requests that never answer surface here instead of leaving the caller
    /// waiting forever.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Requested resource was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// URL is malformed or invalid.
    ///
    /// Raised for a bad API base URL or a pagination cursor that does not
    /// parse as an absolute URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Recipe identifier cannot be used to address the API.
    #[error("Invalid recipe id '{0}': only [A-Za-z0-9_-] are allowed")]
    InvalidRecipeId(String),

    /// Configuration is invalid or incomplete.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Key-value store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// A stored record exists but its JSON no longer decodes.
    ///
    /// Callers treat the record as absent; the value is left in place so a
    /// later `unsave` or `save` can clear it.
    #[error("Corrupt saved record '{key}': {reason}")]
    CorruptRecord {
        /// Store key holding the record.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic error for uncategorized failures.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Check if the error might go away if the operation is attempted again.
    ///
    /// Timeouts, connection failures and interrupted I/O are transient. The
    /// library itself never retries; this is a hint for the caller.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Timeout(_) => true,
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string identifier.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Timeout(_) => "timeout",
            Self::NotFound(_) => "not_found",
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidRecipeId(_) => "invalid_recipe_id",
            Self::Config(_) => "config",
            Self::Storage(_) => "storage",
            Self::CorruptRecord { .. } => "corrupt_record",
            Self::Serialization(_) => "serialization",
            Self::Other(_) => "other",
        }
    }
}

/// Convenience type alias for results with the telma-core error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[allow(clippy::panic, clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display_formatting() {
        let cases = vec![
            (Error::Timeout("search".into()), "Timeout: search"),
            (Error::NotFound("recipe abc".into()), "Not found: recipe abc"),
            (Error::InvalidUrl("nope".into()), "Invalid URL: nope"),
            (Error::Config("missing app_id".into()), "Configuration error: missing app_id"),
            (Error::Storage("disk full".into()), "Storage error: disk full"),
            (Error::Other("plain".into()), "plain"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_invalid_recipe_id_mentions_allowed_characters() {
        let message = Error::InvalidRecipeId("../etc".into()).to_string();
        assert!(message.contains("../etc"));
        assert!(message.contains("[A-Za-z0-9_-]"));
    }

    #[test]
    fn test_corrupt_record_display() {
        let err = Error::CorruptRecord {
            key: "cookie-recipe42".into(),
            reason: "expected value at line 1".into(),
        };
        let message = err.to_string();
        assert!(message.contains("cookie-recipe42"));
        assert!(message.contains("expected value"));
        assert_eq!(err.category(), "corrupt_record");
    }

    #[test]
    fn test_error_from_io_error() {
        let error: Error = io::Error::new(io::ErrorKind::NotFound, "file not found").into();
        match error {
            Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::NotFound),
            other => panic!("Expected IO error variant, got {other:?}"),
        }
    }

    #[test]
    fn test_error_from_serde_json() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: Error = parse_err.into();
        assert_eq!(error.category(), "serialization");
    }

    #[test]
    fn test_error_recoverability() {
        let recoverable = vec![
            Error::Timeout("slow".into()),
            Error::Io(io::Error::new(io::ErrorKind::TimedOut, "timeout")),
            Error::Io(io::Error::new(io::ErrorKind::Interrupted, "interrupted")),
        ];
        let permanent = vec![
            Error::Io(io::Error::new(io::ErrorKind::PermissionDenied, "denied")),
            Error::NotFound("missing".into()),
            Error::InvalidRecipeId("a/b".into()),
            Error::Config("bad".into()),
            Error::Storage("broken".into()),
            Error::Serialization("bad json".into()),
        ];

        for error in recoverable {
            assert!(error.is_recoverable(), "Expected {error:?} to be recoverable");
        }
        for error in permanent {
            assert!(!error.is_recoverable(), "Expected {error:?} to be permanent");
        }
    }

    #[test]
    fn test_error_categories() {
        let cases = vec![
            (Error::Io(io::Error::other("x")), "io"),
            (Error::Timeout("x".into()), "timeout"),
            (Error::NotFound("x".into()), "not_found"),
            (Error::InvalidUrl("x".into()), "invalid_url"),
            (Error::InvalidRecipeId("x".into()), "invalid_recipe_id"),
            (Error::Config("x".into()), "config"),
            (Error::Storage("x".into()), "storage"),
            (Error::Serialization("x".into()), "serialization"),
            (Error::Other("x".into()), "other"),
        ];

        for (error, expected) in cases {
            assert_eq!(error.category(), expected);
        }
    }
}
