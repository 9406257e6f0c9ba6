//! The normalized citation record produced by a resolver.

/// A resolved bibliographic record.
///
/// Every field except `url` is independently optional. String fields that
/// came from an upstream source are already cleaned by the resolver that
/// built the record; `authors` is a pre-formatted display string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Publication {
    /// Canonical source URI.
    pub url: String,
    /// Work title.
    pub title: Option<String>,
    /// Publication year.
    pub year: Option<i32>,
    /// Journal or container title.
    pub journal: Option<String>,
    /// Journal volume.
    pub volume: Option<String>,
    /// Journal issue.
    pub issue: Option<String>,
    /// Page range.
    pub pages: Option<String>,
    /// Formatted author list, e.g. `"Smith & Jones"` or `"Smith et al."`.
    pub authors: Option<String>,
}

impl Publication {
    /// Creates a record with only the source URI set.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            year: None,
            journal: None,
            volume: None,
            issue: None,
            pages: None,
            authors: None,
        }
    }

    /// Returns a copy of this record with `title` replaced.
    #[must_use]
    pub fn with_title(self, title: Option<String>) -> Self {
        Self { title, ..self }
    }
}
