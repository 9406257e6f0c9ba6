//! Resolution orchestrator: classify, resolve, render.
//!
//! [`CitationService`] is the single entry point an outer surface (CLI, HTTP
//! route) calls with a raw `uri` and an optional Accept value. It routes the
//! classified identifier to the matching resolver and hands the resulting
//! record to the renderer. Classification failures are reported before any
//! network call.

use tracing::info;
use url::Url;

use crate::error::LookupError;
use crate::identifier::{Identifier, classify};
use crate::markup::strip_tags;
use crate::publication::Publication;
use crate::render::{Rendered, negotiate, render};
use crate::resolver::{
    CrossrefResolver, DEFAULT_CROSSREF_BASE_URL, DEFAULT_DOI_BASE_URL, DEFAULT_HANDLE_BASE_URL,
    LandingPageResolver,
};

/// How inline markup in resolved fields is treated before rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkupPolicy {
    /// Render fields exactly as resolved.
    #[default]
    Keep,
    /// Sanitize, unicodize and strip tags from the title.
    Strip,
}

/// Upstream endpoints and rendering options for a [`CitationService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// CrossRef REST API base URL.
    pub crossref_base_url: String,
    /// Handle proxy base URL; handles resolve to `{handle_base_url}/{handle}`.
    pub handle_base_url: String,
    /// DOI resolver base URL used for the `url` of DOI records.
    pub doi_base_url: String,
    /// Markup treatment applied before rendering.
    pub markup: MarkupPolicy,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            crossref_base_url: DEFAULT_CROSSREF_BASE_URL.to_string(),
            handle_base_url: DEFAULT_HANDLE_BASE_URL.to_string(),
            doi_base_url: DEFAULT_DOI_BASE_URL.to_string(),
            markup: MarkupPolicy::default(),
        }
    }
}

/// Resolves identifiers to rendered citations.
///
/// Holds no per-request state; every call fetches afresh.
///
/// # Example
///
/// ```no_run
/// use citation_core::{CitationService, LookupConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let service = CitationService::new(LookupConfig::default());
/// let rendered = service.lookup("doi:10.1000/xyz", Some("text/html")).await?;
/// println!("{}", rendered.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CitationService {
    crossref: CrossrefResolver,
    landing_page: LandingPageResolver,
    handle_base_url: String,
    markup: MarkupPolicy,
}

impl CitationService {
    /// Creates a service from `config`.
    #[must_use]
    pub fn new(config: LookupConfig) -> Self {
        Self {
            crossref: CrossrefResolver::with_base_urls(
                config.crossref_base_url,
                config.doi_base_url,
            ),
            landing_page: LandingPageResolver::new(),
            handle_base_url: config.handle_base_url.trim_end_matches('/').to_string(),
            markup: config.markup,
        }
    }

    /// Returns the landing-page URL a Handle resolves through.
    #[must_use]
    pub fn handle_url(&self, handle: &str) -> String {
        format!("{}/{handle}", self.handle_base_url)
    }

    /// Resolves an already-classified identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Upstream`] when the metadata source cannot be fetched.
    pub async fn resolve_identifier(
        &self,
        identifier: &Identifier,
    ) -> Result<Publication, LookupError> {
        let publication = match identifier {
            Identifier::Doi(doi) => self.crossref.resolve(doi).await?,
            Identifier::Handle(handle) => {
                self.landing_page
                    .resolve(&self.handle_url(handle))
                    .await?
            }
        };
        Ok(self.apply_markup_policy(publication))
    }

    /// Classifies `uri` and resolves it to a publication.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidInput`] when `uri` is neither a DOI nor
    /// a Handle, or [`LookupError::Upstream`] when the fetch fails.
    pub async fn resolve(&self, uri: &str) -> Result<Publication, LookupError> {
        let identifier = classify(uri)?;
        self.resolve_identifier(&identifier).await
    }

    /// Resolves any landing page by its `citation_*` meta tags.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::InvalidInput`] when `url` is not an absolute
    /// http(s) URL, or [`LookupError::Upstream`] when the page cannot be fetched.
    pub async fn resolve_landing_page(&self, url: &str) -> Result<Publication, LookupError> {
        match Url::parse(url) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
            _ => return Err(LookupError::invalid_landing_page_url()),
        }
        let publication = self.landing_page.resolve(url).await?;
        Ok(self.apply_markup_policy(publication))
    }

    /// Resolves `uri` and renders it in the media type negotiated from `accept`.
    ///
    /// # Errors
    ///
    /// See [`CitationService::resolve`].
    #[tracing::instrument(skip(self))]
    pub async fn lookup(&self, uri: &str, accept: Option<&str>) -> Result<Rendered, LookupError> {
        let publication = self.resolve(uri).await?;
        let rendered = render(&publication, negotiate(accept));
        info!(media_type = %rendered.media_type, url = %publication.url, "citation rendered");
        Ok(rendered)
    }

    fn apply_markup_policy(&self, publication: Publication) -> Publication {
        match self.markup {
            MarkupPolicy::Keep => publication,
            MarkupPolicy::Strip => {
                let title = publication.title.as_deref().map(strip_tags);
                publication.with_title(title)
            }
        }
    }
}

impl Default for CitationService {
    fn default() -> Self {
        Self::new(LookupConfig::default())
    }
}
