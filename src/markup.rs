//! Inline-markup normalization for metadata fields.
//!
//! Titles from publishers regularly carry chemical or mathematical notation
//! (`H<sub>2</sub>O`, `x<sup>2</sup>`), sometimes escaped once or twice on
//! the way. The pipeline here is:
//!
//! 1. [`unescape_twice`] recovers text escaped more than once.
//! 2. [`sanitize_html`] keeps only `strong`, `em`, `sub`, `sup`, with no attributes.
//! 3. [`unicodize_sub_sup`] turns single-character sub/superscripts into code points.
//! 4. [`strip_tags`] drops whatever markup is left.

use std::fmt::Write as _;
use std::sync::LazyLock;

use html_escape::{decode_html_entities, encode_text};
use regex::{Captures, Regex};
use scraper::{ElementRef, Html, Node};

use crate::static_regex::compile_static_regex;

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: [&str; 4] = ["strong", "em", "sub", "sup"];

/// Tags whose content is dropped along with the tag itself.
const DROPPED_CONTENT_TAGS: [&str; 4] = ["script", "style", "template", "noscript"];

/// Characters with a Unicode subscript form.
pub const SUBSCRIPTS: [(char, char); 29] = [
    ('0', '₀'),
    ('1', '₁'),
    ('2', '₂'),
    ('3', '₃'),
    ('4', '₄'),
    ('5', '₅'),
    ('6', '₆'),
    ('7', '₇'),
    ('8', '₈'),
    ('9', '₉'),
    ('+', '₊'),
    ('−', '₋'),
    ('-', '₋'),
    ('=', '₌'),
    ('(', '₍'),
    (')', '₎'),
    ('a', 'ₐ'),
    ('e', 'ₑ'),
    ('o', 'ₒ'),
    ('x', 'ₓ'),
    ('ə', 'ₔ'),
    ('h', 'ₕ'),
    ('k', 'ₖ'),
    ('l', 'ₗ'),
    ('m', 'ₘ'),
    ('n', 'ₙ'),
    ('p', 'ₚ'),
    ('s', 'ₛ'),
    ('t', 'ₜ'),
];

/// Characters with a Unicode superscript form.
pub const SUPERSCRIPTS: [(char, char); 18] = [
    ('0', '⁰'),
    ('1', '¹'),
    ('2', '²'),
    ('3', '³'),
    ('4', '⁴'),
    ('5', '⁵'),
    ('6', '⁶'),
    ('7', '⁷'),
    ('8', '⁸'),
    ('9', '⁹'),
    ('+', '⁺'),
    ('−', '⁻'),
    ('-', '⁻'),
    ('=', '⁼'),
    ('(', '⁽'),
    (')', '⁾'),
    ('i', 'ⁱ'),
    ('n', 'ⁿ'),
];

static SUB_RE: LazyLock<Regex> = LazyLock::new(|| single_char_tag_regex("sub", &SUBSCRIPTS));
static SUP_RE: LazyLock<Regex> = LazyLock::new(|| single_char_tag_regex("sup", &SUPERSCRIPTS));

/// Builds `<tag>(c1|c2|...)</tag>` for the characters of a translation table.
fn single_char_tag_regex(tag: &str, table: &[(char, char)]) -> Regex {
    let alternatives = table
        .iter()
        .map(|(from, _)| regex::escape(&from.to_string()))
        .collect::<Vec<_>>()
        .join("|");
    compile_static_regex(&format!("<{tag}>({alternatives})</{tag}>"))
}

fn translate(table: &[(char, char)], caps: &Captures<'_>) -> String {
    let matched = &caps[1];
    matched
        .chars()
        .map(|c| {
            table
                .iter()
                .find_map(|(from, to)| (*from == c).then_some(*to))
                .unwrap_or(c)
        })
        .collect()
}

/// Unescapes HTML character references twice.
///
/// Upstream sources sometimes escape already-escaped text; a second pass
/// recovers the original characters (`&amp;lt;` becomes `<`).
#[must_use]
pub fn unescape_twice(text: &str) -> String {
    let once = decode_html_entities(text);
    decode_html_entities(once.as_ref()).into_owned()
}

/// Reduces an HTML fragment to the allow-listed tag set.
///
/// Input is unescaped twice first. Allowed tags are re-emitted bare (every
/// attribute removed); other tags are unwrapped so their text survives,
/// except script-like containers whose content is dropped. Allowed tags
/// left without content are removed. Text is re-escaped, so the result is
/// well-formed HTML.
#[must_use]
pub fn sanitize_html(text: &str) -> String {
    let unescaped = unescape_twice(text);
    let fragment = Html::parse_fragment(&unescaped);
    let mut out = String::with_capacity(unescaped.len());
    write_allowed(fragment.root_element(), &mut out);
    out
}

fn write_allowed(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&encode_text(&**text)),
            Node::Element(el) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.name();
                if DROPPED_CONTENT_TAGS.contains(&name) {
                    continue;
                }
                if ALLOWED_TAGS.contains(&name) {
                    let mut inner = String::new();
                    write_allowed(child_element, &mut inner);
                    if !inner.is_empty() {
                        let _ = write!(out, "<{name}>{inner}</{name}>");
                    }
                } else {
                    write_allowed(child_element, out);
                }
            }
            _ => {}
        }
    }
}

/// Replaces single-character `<sub>`/`<sup>` elements with Unicode code points.
///
/// Only content drawn from [`SUBSCRIPTS`] or [`SUPERSCRIPTS`] converts;
/// multi-character or unmapped content stays as tagged markup.
///
/// # Examples
///
/// ```
/// use citation_core::markup::unicodize_sub_sup;
///
/// assert_eq!(unicodize_sub_sup("H<sub>2</sub>O"), "H₂O");
/// assert_eq!(unicodize_sub_sup("x<sup>abc</sup>"), "x<sup>abc</sup>");
/// ```
#[must_use]
pub fn unicodize_sub_sup(html: &str) -> String {
    let html = SUB_RE.replace_all(html, |caps: &Captures<'_>| translate(&SUBSCRIPTS, caps));
    SUP_RE
        .replace_all(&html, |caps: &Captures<'_>| translate(&SUPERSCRIPTS, caps))
        .into_owned()
}

/// Sanitizes and unicodizes, keeping the remaining inline markup.
#[must_use]
pub fn to_display_html(text: &str) -> String {
    unicodize_sub_sup(&sanitize_html(text))
}

/// Runs the full pipeline and returns plain text.
///
/// # Examples
///
/// ```
/// use citation_core::markup::strip_tags;
///
/// assert_eq!(strip_tags("CO<sub>2</sub> &amp;amp; <em>x<sup>ab</sup></em>"), "CO₂ & xab");
/// ```
#[must_use]
pub fn strip_tags(text: &str) -> String {
    let html = to_display_html(text);
    Html::parse_fragment(&html).root_element().text().collect()
}
