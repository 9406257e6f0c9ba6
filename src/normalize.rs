//! Field cleaning and author-list formatting.

use html_escape::decode_html_entities;

/// Cleans a metadata string from an upstream source.
///
/// HTML character references are unescaped, then every whitespace run
/// (including newlines and tabs) collapses to a single space and the ends
/// are trimmed.
///
/// # Examples
///
/// ```
/// use citation_core::normalize::clean_text;
///
/// assert_eq!(clean_text("  Caf&eacute;\n\tSociety "), "Café Society");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> String {
    collapse_whitespace(&decode_html_entities(text))
}

/// Collapses whitespace runs to single spaces and trims both ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formats an ordered list of surnames for display.
///
/// Up to two names are joined with `" & "`; three or more collapse to the
/// first name followed by `" et al."`. An empty list yields an empty string.
///
/// # Examples
///
/// ```
/// use citation_core::normalize::format_authors;
///
/// assert_eq!(format_authors(&["Smith", "Jones"]), "Smith & Jones");
/// assert_eq!(format_authors(&["Alpha", "Beta", "Gamma"]), "Alpha et al.");
/// ```
#[must_use]
pub fn format_authors<S: AsRef<str>>(surnames: &[S]) -> String {
    match surnames {
        [first, _, _, ..] => format!("{} et al.", first.as_ref()),
        names => names
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" & "),
    }
}
