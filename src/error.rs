//! Top-level error taxonomy for a citation lookup.
//!
//! Field-level misses never surface here: they are recovered inside the
//! resolvers. What remains is either a caller mistake reported before any
//! I/O, or an upstream failure that aborted resolution.

use thiserror::Error;

use crate::resolver::ResolveError;

/// Name of the lookup parameter carrying the identifier.
pub const URI_PARAM: &str = "uri";

/// Message reported when the identifier matches no supported form.
pub const INVALID_URI_MESSAGE: &str = "expected doi.org or hdl.handle.net URI";

/// Name of the landing-page lookup parameter.
pub const URL_PARAM: &str = "url";

/// Errors returned by [`crate::CitationService`].
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// The caller supplied a value no resolver can accept.
    #[error("invalid value for '{param}': {message}")]
    InvalidInput {
        /// Name of the offending request parameter
        param: &'static str,
        /// Validation failure message
        message: String,
    },

    /// The upstream metadata source could not be fetched.
    #[error(transparent)]
    Upstream(#[from] ResolveError),
}

impl LookupError {
    /// Creates the client-input error for an unrecognized `uri`.
    #[must_use]
    pub fn invalid_uri() -> Self {
        Self::InvalidInput {
            param: URI_PARAM,
            message: INVALID_URI_MESSAGE.to_string(),
        }
    }

    /// Creates the client-input error for a landing-page URL that is not http(s).
    #[must_use]
    pub fn invalid_landing_page_url() -> Self {
        Self::InvalidInput {
            param: URL_PARAM,
            message: "expected an absolute http or https URL".to_string(),
        }
    }

    /// Returns true when the error was caused by caller input rather than an upstream failure.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }
}
