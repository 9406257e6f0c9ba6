//! Identifier classification for lookup input.
//!
//! A raw `uri` is matched against the DOI form first and the Handle form
//! second. Matching is anchored at the start of the string and
//! case-sensitive on the literal tokens (`doi.org`, `doi:`, `hdl.handle.net`,
//! `hdl:`). Whatever follows the recognized prefix is the bare identifier.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::LookupError;
use crate::static_regex::compile_static_regex;

/// DOI form: `http(s)://doi.org/`, `doi.org/`, or `doi:` followed by the DOI.
static DOI_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^(?:(?:https?://)?doi\.org/|doi:)(?P<doi>.*)")
});

/// Handle form: `http(s)://hdl.handle.net/`, `hdl.handle.net/`, or `hdl:` followed by the handle.
static HDL_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r"^(?:(?:https?://)?hdl\.handle\.net/|hdl:)(?P<hdl>.*)")
});

/// A classified identifier, tagged by the metadata source that can resolve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Bare DOI such as `10.1000/xyz`.
    Doi(String),
    /// Bare Handle such as `123/456`.
    Handle(String),
}

impl Identifier {
    /// Returns the bare identifier without any scheme or prefix.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Doi(value) | Self::Handle(value) => value,
        }
    }

    /// Returns a short label for the identifier kind.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Doi(_) => "doi",
            Self::Handle(_) => "hdl",
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.value())
    }
}

/// Classifies a raw `uri` query value as a DOI or Handle.
///
/// # Errors
///
/// Returns [`LookupError::InvalidInput`] attributed to the `uri` parameter
/// when the input matches neither form, or when the recognized prefix is
/// followed by nothing.
///
/// # Examples
///
/// ```
/// use citation_core::identifier::{classify, Identifier};
///
/// let id = classify("https://doi.org/10.1000/xyz").unwrap();
/// assert_eq!(id, Identifier::Doi("10.1000/xyz".to_string()));
/// ```
#[tracing::instrument(level = "debug")]
pub fn classify(uri: &str) -> Result<Identifier, LookupError> {
    let identifier = if let Some(caps) = DOI_RE.captures(uri) {
        Identifier::Doi(caps["doi"].to_string())
    } else if let Some(caps) = HDL_RE.captures(uri) {
        Identifier::Handle(caps["hdl"].to_string())
    } else {
        debug!("input matches neither DOI nor Handle form");
        return Err(LookupError::invalid_uri());
    };

    if identifier.value().is_empty() {
        debug!(kind = identifier.kind(), "recognized prefix without identifier");
        return Err(LookupError::invalid_uri());
    }

    debug!(identifier = %identifier, "classified input");
    Ok(identifier)
}
