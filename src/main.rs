// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Run the page analysis
// 3. Print the result as a report or as JSON
// 4. Exit with proper code (0 = all links reachable, 1 = some inaccessible,
//    2 = analysis failed)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod analyzer; // src/analyzer/ - the page-analysis pipeline
mod cli; //      src/cli.rs - command-line parsing
mod config; //   src/config.rs - shared analyzer settings
mod error; //    src/error.rs - typed analyzer errors

use std::time::Duration;

use analyzer::AnalysisResult;
use anyhow::Result;
use clap::Parser;
use cli::Cli;
use config::AnalyzerConfig;

#[tokio::main]
async fn main() {
    // RUST_LOG controls diagnostic output; the report itself goes to stdout
    env_logger::init();

    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// Main application logic
// Returns:
//   Ok(0) = page analyzed, every probed link reachable
//   Ok(1) = page analyzed, some links inaccessible
//   Err   = the analysis itself failed
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    let mut config = AnalyzerConfig {
        probe_timeout: Duration::from_secs(cli.timeout_secs),
        max_concurrent_probes: cli.max_concurrent,
        ..AnalyzerConfig::default()
    };
    if let Some(user_agent) = cli.user_agent {
        config.user_agent = user_agent;
    }

    if !cli.json {
        println!("🔍 Analyzing page: {}", cli.url);
    }

    let result = analyzer::analyze(&cli.url, &config).await?;

    if cli.json {
        // Serialize the result to JSON and print
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    if result.inaccessible_link_count > 0 {
        Ok(1) // Exit code 1 = some links did not answer
    } else {
        Ok(0) // Exit code 0 = everything reachable
    }
}

// Prints the analysis as a human-readable report in the terminal
fn print_report(result: &AnalysisResult) {
    let title = if result.page_title.is_empty() {
        "(none)"
    } else {
        result.page_title.as_str()
    };

    println!();
    println!("📄 Title:          {}", title);
    println!("🏷️  Markup version: {}", result.markup_version);
    println!(
        "🔐 Login form:     {}",
        if result.has_login_form { "yes" } else { "no" }
    );

    println!();
    println!("{:<10} {:<10}", "HEADING", "COUNT");
    println!("{}", "=".repeat(20));
    for (level, count) in &result.heading_counts {
        println!("{:<10} {:<10}", level, count);
    }

    println!();
    println!("📊 Links:");
    println!("   🏠 Internal:     {}", result.internal_link_count);
    println!("   🌍 External:     {}", result.external_link_count);
    println!("   ❌ Inaccessible: {}", result.inaccessible_link_count);
}
