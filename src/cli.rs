//! CLI argument definitions using clap derive macros.

use clap::Parser;

/// Resolve a DOI or Handle into a formatted citation.
///
/// Accepts `https://doi.org/...`, `doi:...`, `https://hdl.handle.net/...`
/// or `hdl:...` and prints the citation to stdout.
#[derive(Parser, Debug)]
#[command(name = "citation")]
#[command(author, version, about)]
pub struct Args {
    /// DOI or Handle URI to resolve
    pub uri: String,

    /// Accept header value used to pick the output format
    /// (text/plain, text/html, application/json)
    #[arg(short, long, value_name = "MEDIA-TYPES")]
    pub accept: Option<String>,

    /// Strip inline markup from titles before rendering
    #[arg(long)]
    pub strip_markup: bool,

    /// Increase output verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output except errors
    #[arg(short, long)]
    pub quiet: bool,
}
