//! Landing-page resolver - reads `citation_*` meta tags from an HTML page.
//!
//! Handle identifiers redirect to a repository landing page, and most
//! repositories (DSpace, EPrints, OJS) embed Highwire-style citation meta
//! tags. Only the title, date and author tags are read; journal, volume,
//! issue and pages are never taken from this source.

use tracing::{debug, warn};

use crate::normalize::format_authors;
use crate::publication::Publication;

use super::ResolveError;
use super::http_client::fetch_text;
use super::utils::{extract_year_from_str, scan_meta_tags};

const RESOLVER_NAME: &str = "landing_page";

/// Resolves any landing-page URL to a publication via its citation meta tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct LandingPageResolver;

impl LandingPageResolver {
    /// Creates a new landing-page resolver.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Fetches `url`, following redirects, and extracts citation metadata.
    ///
    /// The resulting publication's `url` is the `url` passed in, not the
    /// final redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UpstreamFetch`] when the page cannot be fetched
    /// or answers with a non-2xx status.
    #[tracing::instrument(skip(self), fields(resolver = RESOLVER_NAME))]
    pub async fn resolve(&self, url: &str) -> Result<Publication, ResolveError> {
        let html = fetch_text(RESOLVER_NAME, url, "text/html").await?;
        let citation = extract_citation_meta(&html);

        if citation.title.is_none() {
            warn!(field = "title", %url, "no citation_title meta tag");
        }
        if citation.year.is_none() {
            warn!(field = "year", %url, "no citation_date meta tag with a year");
        }
        if citation.authors.is_empty() {
            warn!(field = "authors", %url, "no citation_author meta tags");
        }
        debug!(authors = citation.authors.len(), "landing page metadata extracted");

        Ok(Publication {
            title: citation.title,
            year: citation.year,
            authors: Some(format_authors(&citation.authors)),
            ..Publication::new(url)
        })
    }
}

/// Citation fields collected from a landing page's meta tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationMeta {
    /// Content of the last `citation_title` tag, verbatim.
    pub title: Option<String>,
    /// Year from the last `citation_date` tag containing four digits.
    pub year: Option<i32>,
    /// Surnames from every `citation_author` tag, in document order.
    pub authors: Vec<String>,
}

/// Collects `citation_title`, `citation_date` and `citation_author` tags.
///
/// Tags are processed in document order and later tags overwrite earlier
/// ones for the single-valued fields. An author's surname is the part of the
/// content before the first comma; authors with an empty surname are skipped.
///
/// # Examples
///
/// ```
/// use citation_core::resolver::extract_citation_meta;
///
/// let meta = extract_citation_meta(
///     r#"<meta name="citation_author" content="Curie, Marie">
///        <meta name="citation_date" content="1903/06/25">"#,
/// );
/// assert_eq!(meta.authors, vec!["Curie".to_string()]);
/// assert_eq!(meta.year, Some(1903));
/// ```
#[must_use]
pub fn extract_citation_meta(html: &str) -> CitationMeta {
    let mut citation = CitationMeta::default();
    for tag in scan_meta_tags(html) {
        let (Some(name), Some(content)) = (tag.name, tag.content) else {
            continue;
        };
        match name.as_str() {
            "citation_title" => citation.title = Some(content),
            "citation_date" => {
                if let Some(year) = extract_year_from_str(&content) {
                    citation.year = Some(year);
                }
            }
            "citation_author" => {
                let surname = content
                    .split_once(',')
                    .map_or(content.as_str(), |(s, _)| s)
                    .trim();
                if !surname.is_empty() {
                    citation.authors.push(surname.to_string());
                }
            }
            _ => {}
        }
    }
    citation
}
