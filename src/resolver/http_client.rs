//! Shared HTTP fetch policy for resolvers.
//!
//! Every fetch builds a fresh client scoped to the call, issues exactly one
//! GET, and drops the client before returning, so the connection is released
//! on success and on every failure path. There is no retry, and timeouts are
//! the client defaults.

use reqwest::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use reqwest::redirect::Policy;
use tracing::{debug, error, info};

use crate::user_agent;

use super::ResolveError;

/// Maximum redirect hops followed for a single fetch.
const MAX_REDIRECTS: usize = 10;

/// Builds a resolver HTTP client using the shared project policy.
///
/// `resolver_name` is only used in error messages, not in the User-Agent.
///
/// # Errors
///
/// Returns [`ResolveError::ClientBuild`] when client construction fails.
pub(crate) fn build_resolver_http_client(resolver_name: &str) -> Result<Client, ResolveError> {
    Client::builder()
        .user_agent(user_agent::default_resolver_user_agent())
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .build()
        .map_err(|e| ResolveError::client_build(resolver_name, &e))
}

/// Fetches `url` once and returns the response body as text.
///
/// Logs the query before sending and logs the failing URL on any error.
///
/// # Errors
///
/// Returns [`ResolveError::UpstreamFetch`] on transport failure, a non-2xx
/// status, or an unreadable body.
pub(crate) async fn fetch_text(
    resolver_name: &str,
    url: &str,
    accept: &'static str,
) -> Result<String, ResolveError> {
    info!(resolver = resolver_name, %url, "querying upstream");
    let client = build_resolver_http_client(resolver_name)?;

    let response = client
        .get(url)
        .header(ACCEPT, HeaderValue::from_static(accept))
        .send()
        .await
        .map_err(|e| {
            error!(resolver = resolver_name, %url, error = %e, "querying upstream failed");
            ResolveError::transport(url, &e)
        })?;

    let status = response.status();
    if !status.is_success() {
        error!(
            resolver = resolver_name,
            %url,
            status = status.as_u16(),
            "querying upstream failed"
        );
        return Err(ResolveError::http_status(url, status.as_u16()));
    }
    if response.url().as_str() != url {
        debug!(resolver = resolver_name, final_url = %response.url(), "followed redirect");
    }

    response.text().await.map_err(|e| {
        error!(resolver = resolver_name, %url, error = %e, "reading upstream body failed");
        ResolveError::transport(url, &e)
    })
}
