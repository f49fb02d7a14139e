// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There is a single operation - analyze one page - so the interface is a
// flat argument list rather than subcommands.
// =============================================================================

use clap::Parser;

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "page-inspector",
    version = "0.1.0",
    about = "Analyze a web page's structure, links and reachability",
    long_about = "page-inspector fetches a single web page and reports its markup version, \
                  title, heading counts, login-form presence, and how many of its links are \
                  internal, external, and currently unreachable."
)]
pub struct Cli {
    /// Page URL to analyze (e.g., https://example.com)
    ///
    /// This is a positional argument (required, no flag needed)
    pub url: String,

    /// Output the result in JSON format instead of a report
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds (page fetch and each link probe)
    #[arg(long, default_value_t = 10)]
    pub timeout_secs: u64,

    /// Maximum number of link probes in flight at once
    #[arg(long, default_value_t = 50)]
    pub max_concurrent: usize,

    /// Override the User-Agent header sent with every request
    #[arg(long)]
    pub user_agent: Option<String>,
}
