//! Metadata resolvers turning identifiers into [`Publication`](crate::Publication) records.
//!
//! Each resolver performs exactly one upstream fetch per call:
//!
//! - [`CrossrefResolver`] - DOI lookup against the CrossRef works API (JSON)
//! - [`LandingPageResolver`] - `citation_*` meta tags of any landing page (HTML),
//!   used for Handle identifiers
//!
//! A failed fetch aborts the resolution with a [`ResolveError`]. Missing or
//! malformed fields in a successful response are logged at `warn` level with
//! `field` and `url` and left absent.
//!
//! # Example
//!
//! ```no_run
//! use citation_core::resolver::CrossrefResolver;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let publication = CrossrefResolver::new().resolve("10.1000/xyz").await?;
//! println!("{:?}", publication.title);
//! # Ok(())
//! # }
//! ```

mod crossref;
mod error;
mod http_client;
mod landing_page;
mod utils;

pub use crossref::{CrossrefResolver, DEFAULT_CROSSREF_BASE_URL};
pub use error::ResolveError;
pub use landing_page::{CitationMeta, LandingPageResolver, extract_citation_meta};

/// Default DOI resolver base URL, used for the canonical `url` of DOI records.
pub const DEFAULT_DOI_BASE_URL: &str = "https://doi.org";

/// Default Handle proxy base URL.
pub const DEFAULT_HANDLE_BASE_URL: &str = "https://hdl.handle.net";
