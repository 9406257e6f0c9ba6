//! Citation rendering with Accept-header content negotiation.
//!
//! Every format uses the same field order, joined by `". "`: authors and
//! year, title, journal block, url.

use std::fmt;
use std::str::FromStr;

use html_escape::encode_quoted_attribute;
use thiserror::Error;
use tracing::debug;

use crate::publication::Publication;

/// Placeholder for a record without authors.
const NO_AUTHORS: &str = "N.N.";
/// Placeholder for a record without a year.
const NO_YEAR: &str = "n.d.";

/// Media types the renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaType {
    /// `text/plain`, unescaped.
    #[default]
    TextPlain,
    /// `text/html`, escaped with `<i>` around journal and volume.
    TextHtml,
    /// `application/json`, a flat object with absent fields as `null`.
    ApplicationJson,
}

impl MediaType {
    /// Returns the canonical media type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TextPlain => "text/plain",
            Self::TextHtml => "text/html",
            Self::ApplicationJson => "application/json",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media type the renderer does not produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported media type '{0}'")]
pub struct UnsupportedMediaType(pub String);

impl FromStr for MediaType {
    type Err = UnsupportedMediaType;

    /// Parses one Accept candidate; parameters and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let essence = s.split(';').next().unwrap_or_default().trim();
        if essence.eq_ignore_ascii_case("text/plain") {
            Ok(Self::TextPlain)
        } else if essence.eq_ignore_ascii_case("text/html") {
            Ok(Self::TextHtml)
        } else if essence.eq_ignore_ascii_case("application/json") {
            Ok(Self::ApplicationJson)
        } else {
            Err(UnsupportedMediaType(essence.to_string()))
        }
    }
}

/// Picks the first supported media type from an Accept header value.
///
/// Candidates are tried in the order given; quality parameters are not
/// weighed. Falls back to plain text when nothing matches or no header was
/// sent.
///
/// # Examples
///
/// ```
/// use citation_core::render::{MediaType, negotiate};
///
/// assert_eq!(negotiate(Some("text/html, text/plain;q=0.9")), MediaType::TextHtml);
/// assert_eq!(negotiate(Some("application/xml")), MediaType::TextPlain);
/// assert_eq!(negotiate(None), MediaType::TextPlain);
/// ```
#[must_use]
pub fn negotiate(accept: Option<&str>) -> MediaType {
    let chosen = accept
        .into_iter()
        .flat_map(|value| value.split(','))
        .find_map(|candidate| candidate.parse::<MediaType>().ok())
        .unwrap_or_default();
    debug!(accept = accept.unwrap_or_default(), media_type = %chosen, "negotiated media type");
    chosen
}

/// A rendered citation and the media type it was rendered as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    /// Media type of `body`, suitable for a `Content-Type` header.
    pub media_type: MediaType,
    /// The formatted citation.
    pub body: String,
}

/// Renders `publication` as `media_type`.
#[must_use]
pub fn render(publication: &Publication, media_type: MediaType) -> Rendered {
    let body = match media_type {
        MediaType::TextPlain => to_plain_text(publication),
        MediaType::TextHtml => to_html(publication),
        MediaType::ApplicationJson => to_json(publication),
    };
    Rendered { media_type, body }
}

/// Authors, treating an empty author string like a missing one.
fn authors_or_placeholder(publication: &Publication) -> &str {
    publication
        .authors
        .as_deref()
        .filter(|authors| !authors.is_empty())
        .unwrap_or(NO_AUTHORS)
}

fn year_or_placeholder(publication: &Publication) -> String {
    publication
        .year
        .map_or_else(|| NO_YEAR.to_string(), |year| year.to_string())
}

/// `journal[, volume[(issue)]][, pages]`, with `wrap` applied to journal and volume.
fn journal_block(
    publication: &Publication,
    escape: fn(&str) -> String,
    wrap: fn(String) -> String,
) -> Option<String> {
    let journal = publication.journal.as_deref()?;
    let mut block = wrap(escape(journal));
    if let Some(volume) = publication.volume.as_deref() {
        block.push_str(", ");
        block.push_str(&wrap(escape(volume)));
        if let Some(issue) = publication.issue.as_deref() {
            block.push('(');
            block.push_str(&escape(issue));
            block.push(')');
        }
    }
    if let Some(pages) = publication.pages.as_deref() {
        block.push_str(", ");
        block.push_str(&escape(pages));
    }
    Some(block)
}

fn join_parts(
    publication: &Publication,
    escape: fn(&str) -> String,
    wrap: fn(String) -> String,
    link: fn(&str) -> String,
) -> String {
    let mut parts = vec![format!(
        "{} ({})",
        escape(authors_or_placeholder(publication)),
        year_or_placeholder(publication)
    )];
    if let Some(title) = publication.title.as_deref() {
        parts.push(escape(title));
    }
    if let Some(block) = journal_block(publication, escape, wrap) {
        parts.push(block);
    }
    parts.push(link(&publication.url));
    parts.join(". ")
}

fn to_plain_text(publication: &Publication) -> String {
    join_parts(publication, str::to_string, |s| s, str::to_string)
}

fn escape_html(text: &str) -> String {
    encode_quoted_attribute(text).into_owned()
}

fn to_html(publication: &Publication) -> String {
    join_parts(
        publication,
        escape_html,
        |s| format!("<i>{s}</i>"),
        |url| {
            let url = escape_html(url);
            format!("<a href=\"{url}\">{url}</a>")
        },
    )
}

fn to_json(publication: &Publication) -> String {
    serde_json::json!({
        "url": publication.url,
        "title": publication.title,
        "year": publication.year,
        "journal": publication.journal,
        "volume": publication.volume,
        "issue": publication.issue,
        "pages": publication.pages,
        "authors": publication.authors,
    })
    .to_string()
}
