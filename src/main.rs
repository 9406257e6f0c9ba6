//! CLI entry point for the citation tool.

use std::process::ExitCode;

use anyhow::{Context, Result};
use citation_core::{CitationService, LookupConfig, MarkupPolicy};
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;

use app_config::FileConfig;
use cli::Args;

/// Exit code for input the classifier rejects.
const EXIT_INVALID_INPUT: u8 = 2;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();
    let file_config =
        app_config::load_default_file_config().context("Failed to load configuration")?;

    // Priority: RUST_LOG env var > quiet flag > verbose flag > config verbosity > default (warn)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => file_config
                .verbosity
                .map_or("warn", app_config::VerbositySetting::filter_directive),
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    // Logs go to stderr; stdout carries only the citation.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, ?file_config, "CLI arguments parsed");

    let service = CitationService::new(lookup_config(&args, &file_config));
    let accept = args.accept.as_deref().or(file_config.accept.as_deref());

    match service.lookup(&args.uri, accept).await {
        Ok(rendered) => {
            println!("{}", rendered.body);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) if err.is_client_error() => {
            eprintln!("error: {err}");
            Ok(ExitCode::from(EXIT_INVALID_INPUT))
        }
        Err(err) => {
            eprintln!("error: {err}");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Merges CLI flags over file config over library defaults.
fn lookup_config(args: &Args, file_config: &FileConfig) -> LookupConfig {
    let defaults = LookupConfig::default();
    let strip_markup = args.strip_markup || file_config.strip_markup.unwrap_or(false);
    LookupConfig {
        crossref_base_url: file_config
            .crossref_base_url
            .clone()
            .unwrap_or(defaults.crossref_base_url),
        handle_base_url: file_config
            .handle_base_url
            .clone()
            .unwrap_or(defaults.handle_base_url),
        doi_base_url: defaults.doi_base_url,
        markup: if strip_markup {
            MarkupPolicy::Strip
        } else {
            MarkupPolicy::Keep
        },
    }
}
