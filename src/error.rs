// src/error.rs
// =============================================================================
// Typed errors for the page analyzer.
//
// Only three things can abort an analysis: a URL we cannot parse, a page we
// cannot fetch, and a body we cannot read. Everything that goes wrong with an
// individual link (unresolvable href, failed probe, 4xx/5xx) is data, not an
// error - it shows up in the result counts instead of here.
// =============================================================================

use thiserror::Error;

// The error taxonomy of `analyze()`.
//
// The binary wraps this in anyhow at the top level; callers that care about
// the failure class can match on the variants directly.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// The input URL could not be parsed as an absolute URL
    #[error("invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The page could not be retrieved: transport failure or non-2xx status
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response arrived but its body could not be read or decoded
    #[error("failed to read page body from {url}: {source}")]
    Parse {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}
