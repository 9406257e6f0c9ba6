//! Shared utilities for resolver modules: meta tag scanning and year extraction.

use std::sync::LazyLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::static_regex::compile_static_regex;

/// A whole `<meta ...>` start tag, captured as `attrs`. Quoted attribute
/// values may contain `>`.
///
/// Comments and `<script>`/`<style>` bodies are matched first so the scan
/// consumes them whole; an unterminated one runs to the end of input.
static META_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(concat!(
        r"(?is)<!--.*?(?:-->|\z)",
        r"|<script\b[^>]*>.*?(?:</script\s*>|\z)",
        r"|<style\b[^>]*>.*?(?:</style\s*>|\z)",
        r#"|<meta\b(?P<attrs>(?:[^>"']|"[^"]*"|'[^']*')*)/?>"#,
    ))
});

/// One attribute inside a start tag: bare, double-quoted, single-quoted, or unquoted value.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"([^\s"'>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#,
    )
});

/// First run of four ASCII digits.
static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"[0-9]{4}"));

/// The `name` and `content` attributes of a `<meta>` tag.
///
/// Values have their character references decoded; `None` means the
/// attribute was absent or had no value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MetaTag {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Scans `html` for `<meta>` tags in document order.
///
/// This is a forward-only tag scan; no DOM is built. Tags inside comments
/// and script or style content are skipped. Attribute names match
/// case-insensitively and a repeated attribute takes its last value.
pub(crate) fn scan_meta_tags(html: &str) -> Vec<MetaTag> {
    META_TAG_RE
        .captures_iter(html)
        .filter_map(|caps| caps.name("attrs"))
        .map(|attributes| parse_meta_attributes(attributes.as_str()))
        .collect()
}

fn parse_meta_attributes(attributes: &str) -> MetaTag {
    let mut tag = MetaTag::default();
    for caps in ATTRIBUTE_RE.captures_iter(attributes) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| decode_html_entities(m.as_str()).into_owned());
        match caps[1].to_ascii_lowercase().as_str() {
            "name" => tag.name = value,
            "content" => tag.content = value,
            _ => {}
        }
    }
    tag
}

/// Returns the first run of four consecutive digits in `value` as a year.
#[must_use]
pub(crate) fn extract_year_from_str(value: &str) -> Option<i32> {
    YEAR_RE
        .find(value)
        .and_then(|m| m.as_str().parse::<i32>().ok())
}
