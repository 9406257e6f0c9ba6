//! Error types for resolver operations.
//!
//! Follows the What/Why/Fix pattern used across the project. Only fetch-level
//! failures become errors; missing bibliographic fields are logged and
//! recovered inside the resolvers.

use thiserror::Error;

/// Errors that abort a resolution.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    /// The upstream document could not be fetched or decoded
    #[error("querying '{url}' failed: {reason}\n  Suggestion: {suggestion}")]
    UpstreamFetch {
        /// The URL that was queried
        url: String,
        /// Why the fetch failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The HTTP client for a resolver could not be constructed
    #[error("{resolver} resolver could not build its HTTP client: {reason}")]
    ClientBuild {
        /// Name of the resolver
        resolver: String,
        /// Underlying builder failure
        reason: String,
    },
}

impl ResolveError {
    /// Creates an `UpstreamFetch` error with a generic suggestion.
    #[must_use]
    pub fn upstream_fetch(url: &str, reason: &str) -> Self {
        Self::UpstreamFetch {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "Check the identifier and try again".to_string(),
        }
    }

    /// Creates an `UpstreamFetch` error for a non-success HTTP status.
    #[must_use]
    pub fn http_status(url: &str, status: u16) -> Self {
        let (reason, suggestion) = match status {
            404 => (
                "identifier not found (HTTP 404)".to_string(),
                "Check that the DOI or Handle exists",
            ),
            429 => (
                "rate limit exceeded (HTTP 429)".to_string(),
                "Wait a few seconds before trying again",
            ),
            s if s >= 500 => (
                format!("upstream service unavailable (HTTP {s})"),
                "Try again later",
            ),
            s => (format!("upstream returned HTTP {s}"), "Check the identifier and try again"),
        };
        Self::UpstreamFetch {
            url: url.to_string(),
            reason,
            suggestion: suggestion.to_string(),
        }
    }

    /// Creates an `UpstreamFetch` error for a transport-level failure.
    #[must_use]
    pub fn transport(url: &str, error: &reqwest::Error) -> Self {
        Self::UpstreamFetch {
            url: url.to_string(),
            reason: error.to_string(),
            suggestion: "Check your network connection".to_string(),
        }
    }

    /// Creates a `ClientBuild` error.
    #[must_use]
    pub fn client_build(resolver: &str, error: &reqwest::Error) -> Self {
        Self::ClientBuild {
            resolver: resolver.to_string(),
            reason: error.to_string(),
        }
    }

    /// Returns the URL that failed, when the error is tied to one.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::UpstreamFetch { url, .. } => Some(url),
            Self::ClientBuild { .. } => None,
        }
    }
}
