//! CLI error handling with semantic exit codes.
//!
//! Errors are categorized so that scripts can branch on the exit status.
//!
//! | Code | Category | Description |
//! |------|----------|-------------|
//! | 0 | Success | Command completed successfully |
//! | 1 | `Internal` | Unexpected/internal error |
//! | 2 | `Usage` | Invalid arguments or configuration (e.g. missing API credentials) |
//! | 3 | `NotFound` | Recipe not found |
//! | 4 | `InvalidQuery` | Unusable recipe id or cursor |
//! | 5 | `Network` | Network or HTTP failure |
//! | 6 | `Timeout` | Request timed out |
//! | 7 | `Integrity` | Saved-recipes data is corrupt or unreadable |
//!
//! ```bash
//! telma show abc123
//! case $? in
//!     0) echo "ok" ;;
//!     3) echo "no such recipe" ;;
//!     *) echo "other error" ;;
//! esac
//! ```

use std::fmt;

/// Semantic error category determining the exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ErrorCategory {
    /// Unexpected or internal error (exit code 1).
    Internal = 1,

    /// Invalid arguments or configuration (exit code 2).
    Usage = 2,

    /// Requested resource not found (exit code 3).
    NotFound = 3,

    /// Unusable recipe id, cursor or query (exit code 4).
    InvalidQuery = 4,

    /// Network or fetch failure (exit code 5).
    Network = 5,

    /// Operation timed out (exit code 6).
    Timeout = 6,

    /// Local data corruption (exit code 7).
    Integrity = 7,
}

impl ErrorCategory {
    /// Get the exit code for this category.
    #[must_use]
    pub const fn exit_code(self) -> u8 {
        self as u8
    }

    /// Get a short description of this error category.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Internal => "internal error",
            Self::Usage => "usage error",
            Self::NotFound => "not found",
            Self::InvalidQuery => "invalid query",
            Self::Network => "network error",
            Self::Timeout => "timeout",
            Self::Integrity => "integrity error",
        }
    }

    /// Category for a core library error.
    #[must_use]
    pub const fn from_core(err: &telma_core::Error) -> Self {
        use telma_core::Error;
        match err {
            Error::Network(_) => Self::Network,
            Error::Timeout(_) => Self::Timeout,
            Error::NotFound(_) => Self::NotFound,
            Error::InvalidUrl(_) | Error::InvalidRecipeId(_) => Self::InvalidQuery,
            Error::Config(_) => Self::Usage,
            Error::Storage(_) | Error::CorruptRecord { .. } => Self::Integrity,
            Error::Io(_) | Error::Serialization(_) | Error::Other(_) => Self::Internal,
        }
    }

    /// Infer the error category from an error message.
    ///
    /// Fallback for errors that carry no core error.
    #[must_use]
    pub fn infer_from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        if msg_lower.contains("timeout") || msg_lower.contains("timed out") {
            return Self::Timeout;
        }

        if msg_lower.contains("network")
            || msg_lower.contains("connection")
            || msg_lower.contains("dns")
            || msg_lower.contains("http")
        {
            return Self::Network;
        }

        if msg_lower.contains("not found") || msg_lower.contains("no such") {
            return Self::NotFound;
        }

        if msg_lower.contains("invalid recipe id") || msg_lower.contains("invalid url") {
            return Self::InvalidQuery;
        }

        if msg_lower.contains("corrupt") || msg_lower.contains("storage error") {
            return Self::Integrity;
        }

        if msg_lower.contains("invalid argument")
            || msg_lower.contains("configuration error")
            || msg_lower.contains("invalid value")
        {
            return Self::Usage;
        }

        Self::Internal
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Determine the exit code from an `anyhow::Error`.
///
/// A core error anywhere in the chain decides the category; otherwise it is
/// guessed from the message.
#[must_use]
pub fn exit_code_from_error(err: &anyhow::Error) -> u8 {
    if let Some(core) = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<telma_core::Error>())
    {
        return ErrorCategory::from_core(core).exit_code();
    }

    ErrorCategory::infer_from_message(&err.to_string()).exit_code()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::{Context, anyhow};

    #[test]
    fn test_exit_codes() {
        assert_eq!(ErrorCategory::Internal.exit_code(), 1);
        assert_eq!(ErrorCategory::Usage.exit_code(), 2);
        assert_eq!(ErrorCategory::NotFound.exit_code(), 3);
        assert_eq!(ErrorCategory::InvalidQuery.exit_code(), 4);
        assert_eq!(ErrorCategory::Network.exit_code(), 5);
        assert_eq!(ErrorCategory::Timeout.exit_code(), 6);
        assert_eq!(ErrorCategory::Integrity.exit_code(), 7);
    }

    #[test]
    fn test_core_error_categories() {
        use telma_core::Error;
        let cases = [
            (Error::Timeout("x".into()), ErrorCategory::Timeout),
            (Error::NotFound("x".into()), ErrorCategory::NotFound),
            (Error::InvalidRecipeId("a/b".into()), ErrorCategory::InvalidQuery),
            (Error::InvalidUrl("x".into()), ErrorCategory::InvalidQuery),
            (Error::Config("x".into()), ErrorCategory::Usage),
            (Error::Storage("x".into()), ErrorCategory::Integrity),
            (
                Error::CorruptRecord {
                    key: "k".into(),
                    reason: "r".into(),
                },
                ErrorCategory::Integrity,
            ),
            (Error::Other("x".into()), ErrorCategory::Internal),
        ];
        for (err, expected) in cases {
            assert_eq!(ErrorCategory::from_core(&err), expected, "{err:?}");
        }
    }

    #[test]
    fn test_core_error_found_through_context() {
        let err = Err::<(), _>(telma_core::Error::NotFound("recipe abc".into()))
            .context("loading recipe detail")
            .unwrap_err();
        assert_eq!(exit_code_from_error(&err), 3);
    }

    #[test]
    fn test_message_fallback() {
        assert_eq!(exit_code_from_error(&anyhow!("Operation timed out")), 6);
        assert_eq!(exit_code_from_error(&anyhow!("Something went wrong")), 1);
        assert_eq!(
            ErrorCategory::infer_from_message("Connection refused"),
            ErrorCategory::Network
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ErrorCategory::Timeout.to_string(), "timeout");
        assert_eq!(ErrorCategory::Integrity.to_string(), "integrity error");
    }

    #[test]
    fn test_config_error_through_context_is_usage() {
        let err = Err::<(), _>(telma_core::Error::Config("missing app id".into()))
            .context("loading configuration")
            .unwrap_err();
        assert_eq!(exit_code_from_error(&err), 2);
    }
}
