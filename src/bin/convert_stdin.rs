//! Simple CLI that reads HTML from stdin and writes the rich text document as
//! JSON to stdout. Diagnostics are logged to stderr (`RUST_LOG` controls the level).
//!
//! Flags: `--strict` rejects non top-level root nodes, `--skip-whitespace`
//! drops whitespace-only text nodes.

use std::io::{self, Read};
use std::process::ExitCode;

use html_to_rich_text::{convert_with_options, Options, TopLevelValidation};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut options = Options::default();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--strict" => options.top_level = TopLevelValidation::Strict,
            "--skip-whitespace" => options.ignore_whitespace_text = true,
            other => {
                eprintln!("unknown argument: {other}");
                return ExitCode::from(2);
            }
        }
    }

    let mut html = String::new();
    if io::stdin().read_to_string(&mut html).is_err() {
        eprintln!("Failed to read from stdin");
        return ExitCode::FAILURE;
    }

    let document = match convert_with_options(&html, &options) {
        Ok(document) => document,
        Err(err) => {
            tracing::error!("conversion failed: {err}");
            return ExitCode::FAILURE;
        }
    };

    match serde_json::to_string_pretty(&document) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("failed to serialize document: {err}");
            ExitCode::FAILURE
        }
    }
}
