//! Citation Core Library
//!
//! Resolves a DOI or Handle URI into a normalized citation record and renders
//! it as plain text, HTML, or JSON chosen by Accept-header negotiation.
//!
//! # Architecture
//!
//! - [`identifier`] - classifies a raw URI as a DOI or Handle
//! - [`resolver`] - CrossRef and landing-page metadata resolvers
//! - [`normalize`] - text cleaning and author-list formatting
//! - [`markup`] - inline-markup sanitizer, unicodizer and tag stripper
//! - [`render`] - content negotiation and output formats
//! - [`lookup`] - the [`CitationService`] orchestrator tying these together

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod identifier;
pub mod lookup;
pub mod markup;
pub mod normalize;
pub mod publication;
pub mod render;
pub mod resolver;
mod static_regex;
mod user_agent;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use error::LookupError;
pub use identifier::{Identifier, classify};
pub use lookup::{CitationService, LookupConfig, MarkupPolicy};
pub use publication::Publication;
pub use render::{MediaType, Rendered, negotiate, render};
pub use resolver::ResolveError;
