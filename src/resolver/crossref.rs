//! CrossRef DOI resolver - maps CrossRef works metadata to a [`Publication`].
//!
//! The [`CrossrefResolver`] calls `{base}/works/{doi}` once. A failed fetch
//! aborts the resolution, since without the `message` payload nothing can be
//! recovered. Each bibliographic field is then extracted on its own: a
//! missing or malformed field is logged as a warning and left absent while
//! the remaining fields are still filled in.

use serde_json::Value;
use tracing::{debug, error, warn};

use crate::normalize::{clean_text, format_authors};
use crate::publication::Publication;

use super::http_client::fetch_text;
use super::{DEFAULT_DOI_BASE_URL, ResolveError};

/// Default CrossRef API base URL.
pub const DEFAULT_CROSSREF_BASE_URL: &str = "https://api.crossref.org";

const RESOLVER_NAME: &str = "crossref";

/// Resolves DOIs to publications via the CrossRef REST API.
#[derive(Debug, Clone)]
pub struct CrossrefResolver {
    base_url: String,
    doi_base_url: String,
}

impl CrossrefResolver {
    /// Creates a resolver against the public CrossRef API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_CROSSREF_BASE_URL, DEFAULT_DOI_BASE_URL)
    }

    /// Creates a resolver with custom API and DOI base URLs (for testing with wiremock).
    ///
    /// `doi_base_url` prefixes the `url` of every resolved publication.
    #[must_use]
    pub fn with_base_urls(base_url: impl Into<String>, doi_base_url: impl Into<String>) -> Self {
        Self {
            base_url: trim_trailing_slash(base_url.into()),
            doi_base_url: trim_trailing_slash(doi_base_url.into()),
        }
    }

    /// Returns the works lookup URL for `doi`.
    #[must_use]
    pub fn works_url(&self, doi: &str) -> String {
        format!("{}/works/{doi}", self.base_url)
    }

    /// Fetches CrossRef metadata for `doi` and maps it to a publication.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UpstreamFetch`] when the request fails, the
    /// status is not 2xx, or the body has no JSON `message` object.
    #[tracing::instrument(skip(self), fields(resolver = RESOLVER_NAME))]
    pub async fn resolve(&self, doi: &str) -> Result<Publication, ResolveError> {
        let url = self.works_url(doi);
        let body = fetch_text(RESOLVER_NAME, &url, "application/json").await?;

        let payload: Value = serde_json::from_str(&body).map_err(|e| {
            error!(%url, error = %e, "CrossRef response is not valid JSON");
            ResolveError::upstream_fetch(&url, "CrossRef response is not valid JSON")
        })?;
        let Some(message) = payload.get("message").filter(|m| m.is_object()) else {
            error!(%url, "CrossRef response has no message object");
            return Err(ResolveError::upstream_fetch(
                &url,
                "CrossRef response has no message object",
            ));
        };

        let publication = extract_publication(message, format!("{}/{doi}", self.doi_base_url), &url);
        debug!(url = %publication.url, "CrossRef metadata mapped");
        Ok(publication)
    }
}

impl Default for CrossrefResolver {
    fn default() -> Self {
        Self::new()
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

// ==================== Field Extraction ====================

/// Maps a CrossRef `message` object to a publication, field by field.
///
/// `source_url` names the queried endpoint in missing-field warnings.
pub(crate) fn extract_publication(message: &Value, url: String, source_url: &str) -> Publication {
    Publication {
        url,
        title: field("title", source_url, extract_title(message)),
        year: field("year", source_url, extract_year(message)),
        journal: field("journal", source_url, extract_journal(message)),
        volume: field("volume", source_url, scalar_string(message, "volume")),
        issue: field("issue", source_url, scalar_string(message, "issue")),
        pages: field("pages", source_url, scalar_string(message, "page")),
        authors: field("authors", source_url, extract_authors(message)),
    }
}

/// Passes `value` through, logging a warning when it is absent.
fn field<T>(name: &'static str, source_url: &str, value: Option<T>) -> Option<T> {
    if value.is_none() {
        warn!(field = name, url = %source_url, "no {name} in CrossRef metadata");
    }
    value
}

fn first_string<'a>(message: &'a Value, key: &str) -> Option<&'a str> {
    message.get(key)?.as_array()?.first()?.as_str()
}

fn extract_title(message: &Value) -> Option<String> {
    first_string(message, "title").map(clean_text)
}

/// `published.date-parts[0][0]`.
fn extract_year(message: &Value) -> Option<i32> {
    let year = message
        .get("published")?
        .get("date-parts")?
        .get(0)?
        .get(0)?
        .as_i64()?;
    i32::try_from(year).ok()
}

/// Short container title first, full container title as fallback.
fn extract_journal(message: &Value) -> Option<String> {
    first_string(message, "short-container-title")
        .or_else(|| first_string(message, "container-title"))
        .map(clean_text)
}

/// Takes a scalar field verbatim. Numbers are accepted and rendered as written.
fn scalar_string(message: &Value, key: &str) -> Option<String> {
    match message.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Family names of every author, formatted for display.
///
/// An entry without a `family` name makes the whole list unusable, so the
/// field is reported missing rather than silently shortened.
fn extract_authors(message: &Value) -> Option<String> {
    let surnames = message
        .get("author")?
        .as_array()?
        .iter()
        .map(|author| author.get("family").and_then(Value::as_str))
        .collect::<Option<Vec<&str>>>()?;
    Some(format_authors(&surnames))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_support::log_capture::capture_logs;
    use crate::test_support::socket_guard::start_mock_server_or_skip;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, ResponseTemplate};

    const SOURCE: &str = "https://api.crossref.org/works/10.1/x";

    fn extract(message: &Value) -> Publication {
        extract_publication(message, "https://doi.org/10.1/x".to_string(), SOURCE)
    }

    fn full_message() -> Value {
        serde_json::json!({
            "title": ["A Study"],
            "published": {"date-parts": [[2020, 3, 1]]},
            "container-title": ["J. Things"],
            "volume": "5",
            "issue": "2",
            "page": "10-20",
            "author": [{"given": "Ann", "family": "Smith"}, {"family": "Jones"}]
        })
    }

    // ==================== Field Extraction Tests ====================

    #[test]
    fn test_extract_publication_full() {
        let publication = extract(&full_message());
        assert_eq!(
            publication,
            Publication {
                url: "https://doi.org/10.1/x".to_string(),
                title: Some("A Study".to_string()),
                year: Some(2020),
                journal: Some("J. Things".to_string()),
                volume: Some("5".to_string()),
                issue: Some("2".to_string()),
                pages: Some("10-20".to_string()),
                authors: Some("Smith & Jones".to_string()),
            }
        );
    }

    #[test]
    fn test_extract_publication_empty_message_keeps_url() {
        let publication = extract(&serde_json::json!({}));
        assert_eq!(publication, Publication::new("https://doi.org/10.1/x"));
    }

    #[test]
    fn test_extract_title_is_cleaned() {
        let message = serde_json::json!({"title": ["Fish &amp; Chips:\n   a\tHistory"]});
        assert_eq!(extract_title(&message).as_deref(), Some("Fish & Chips: a History"));
    }

    #[test]
    fn test_extract_title_empty_array_is_missing() {
        assert_eq!(extract_title(&serde_json::json!({"title": []})), None);
    }

    #[test]
    fn test_extract_journal_prefers_short_container_title() {
        let message = serde_json::json!({
            "short-container-title": ["Phys. Rev."],
            "container-title": ["Physical Review"]
        });
        assert_eq!(extract_journal(&message).as_deref(), Some("Phys. Rev."));
    }

    #[test]
    fn test_extract_journal_falls_back_when_short_title_empty() {
        let message = serde_json::json!({
            "short-container-title": [],
            "container-title": ["Physical\n Review"]
        });
        assert_eq!(extract_journal(&message).as_deref(), Some("Physical Review"));
    }

    #[test]
    fn test_extract_year_missing_or_malformed() {
        assert_eq!(extract_year(&serde_json::json!({"published": {}})), None);
        assert_eq!(
            extract_year(&serde_json::json!({"published": {"date-parts": [[]]}})),
            None
        );
        assert_eq!(
            extract_year(&serde_json::json!({"published": {"date-parts": [["2020"]]}})),
            None
        );
    }

    #[test]
    fn test_scalar_fields_taken_verbatim() {
        let message = serde_json::json!({"volume": " 12 ", "issue": 3, "page": ["1"]});
        assert_eq!(scalar_string(&message, "volume").as_deref(), Some(" 12 "));
        assert_eq!(scalar_string(&message, "issue").as_deref(), Some("3"));
        assert_eq!(scalar_string(&message, "page"), None);
    }

    #[test]
    fn test_extract_authors_three_or_more() {
        let message = serde_json::json!({
            "author": [{"family": "Alpha"}, {"family": "Beta"}, {"family": "Gamma"}]
        });
        assert_eq!(extract_authors(&message).as_deref(), Some("Alpha et al."));
    }

    #[test]
    fn test_extract_authors_entry_without_family_is_missing() {
        let message = serde_json::json!({
            "author": [{"family": "Alpha"}, {"name": "The Consortium"}]
        });
        assert_eq!(extract_authors(&message), None);
    }

    #[test]
    fn test_extract_authors_empty_list_formats_empty() {
        assert_eq!(
            extract_authors(&serde_json::json!({"author": []})).as_deref(),
            Some("")
        );
    }

    // ==================== Resolver Tests (wiremock) ====================

    #[test]
    fn test_works_url_uses_bare_doi() {
        let resolver = CrossrefResolver::new();
        assert_eq!(
            resolver.works_url("10.1000/xyz"),
            "https://api.crossref.org/works/10.1000/xyz"
        );
    }

    #[test]
    fn test_with_base_urls_trims_trailing_slash() {
        let resolver = CrossrefResolver::with_base_urls("http://localhost:1/", "https://doi.org/");
        assert_eq!(resolver.works_url("10.1/x"), "http://localhost:1/works/10.1/x");
    }

    #[tokio::test]
    async fn test_resolve_success() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .and(path("/works/10.1/x"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "ok",
                "message": full_message()
            })))
            .mount(&mock_server)
            .await;

        let resolver = CrossrefResolver::with_base_urls(mock_server.uri(), DEFAULT_DOI_BASE_URL);
        let publication = resolver.resolve("10.1/x").await.unwrap();
        assert_eq!(publication.url, "https://doi.org/10.1/x");
        assert_eq!(publication.title.as_deref(), Some("A Study"));
        assert_eq!(publication.authors.as_deref(), Some("Smith & Jones"));
    }

    #[tokio::test]
    async fn test_resolve_missing_author_and_volume_warns_and_continues() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        let mut message = full_message();
        if let Value::Object(fields) = &mut message {
            fields.remove("author");
            fields.remove("volume");
        }
        Mock::given(method("GET"))
            .and(path("/works/10.1/x"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"message": message})),
            )
            .mount(&mock_server)
            .await;

        let (logs, _guard) = capture_logs();
        let resolver = CrossrefResolver::with_base_urls(mock_server.uri(), DEFAULT_DOI_BASE_URL);
        let publication = resolver.resolve("10.1/x").await.unwrap();

        assert_eq!(publication.title.as_deref(), Some("A Study"));
        assert_eq!(publication.year, Some(2020));
        assert_eq!(publication.journal.as_deref(), Some("J. Things"));
        assert_eq!(publication.pages.as_deref(), Some("10-20"));
        assert!(publication.authors.is_none());
        assert!(publication.volume.is_none());

        let expected_url = format!("{}/works/10.1/x", mock_server.uri());
        let author_warnings = logs.missing_field_warnings("authors");
        assert_eq!(author_warnings.len(), 1);
        assert_eq!(author_warnings[0].field("url"), Some(expected_url.as_str()));
        assert_eq!(logs.missing_field_warnings("volume").len(), 1);
        assert!(logs.missing_field_warnings("title").is_empty());
    }

    #[tokio::test]
    async fn test_resolve_404_fails() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&mock_server)
            .await;

        let resolver = CrossrefResolver::with_base_urls(mock_server.uri(), DEFAULT_DOI_BASE_URL);
        let err = resolver.resolve("10.9999/missing").await.unwrap_err();
        let expected_url = format!("{}/works/10.9999/missing", mock_server.uri());
        assert_eq!(err.url(), Some(expected_url.as_str()));
    }

    #[tokio::test]
    async fn test_resolve_malformed_json_fails() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
            .mount(&mock_server)
            .await;

        let resolver = CrossrefResolver::with_base_urls(mock_server.uri(), DEFAULT_DOI_BASE_URL);
        let err = resolver.resolve("10.1/x").await.unwrap_err();
        assert!(err.to_string().contains("not valid JSON"), "unexpected: {err}");
    }

    #[tokio::test]
    async fn test_resolve_missing_message_fails() {
        let Some(mock_server) = start_mock_server_or_skip().await else {
            return;
        };
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "ok"})),
            )
            .mount(&mock_server)
            .await;

        let resolver = CrossrefResolver::with_base_urls(mock_server.uri(), DEFAULT_DOI_BASE_URL);
        let err = resolver.resolve("10.1/x").await.unwrap_err();
        assert!(err.to_string().contains("no message object"), "unexpected: {err}");
    }
}
