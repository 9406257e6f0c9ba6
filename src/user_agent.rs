//! Shared User-Agent string for outbound resolver traffic.
//!
//! CrossRef and landing-page requests identify the tool the same way.

/// Product token used in every outbound User-Agent header.
const PRODUCT: &str = "citation-service";

/// Default User-Agent for resolver requests.
#[must_use]
pub(crate) fn default_resolver_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("{PRODUCT}/{version} (citation-lookup)")
}
