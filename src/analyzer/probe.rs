// src/analyzer/probe.rs
// =============================================================================
// Link liveness probing.
//
// Each candidate link gets one HEAD request - HEAD because we only care
// whether the resource answers, not what it contains. A probe returns a
// plain bool; every failure mode (bad URL, connection refused, timeout,
// 4xx/5xx) maps to false and is recorded as data, never raised as an error.
//
// Probes run concurrently through a bounded pool. The pool size caps how
// many requests are in flight at once without changing the contract that
// every candidate is probed and the result waits for all of them.
// =============================================================================

use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use url::Url;

// Probes all candidate links and returns how many were unreachable
//
// Parameters:
//   client: shared HTTP client (cloned per task; it's an Arc internally)
//   links: resolved absolute URLs from the classification pass
//   max_concurrent: cap on in-flight probes
//
// The collect() below is the join barrier: every outcome lands in the
// vector before anything is tallied, so the caller never observes a
// partial count.
pub async fn probe_links(client: &Client, links: Vec<Url>, max_concurrent: usize) -> usize {
    let probes = links.into_iter().map(|url| {
        let client = client.clone();
        async move { is_reachable(&client, url).await }
    });

    let outcomes: Vec<bool> = stream::iter(probes)
        .buffer_unordered(max_concurrent.max(1))
        .collect()
        .await;

    outcomes.into_iter().filter(|&reachable| !reachable).count()
}

// Checks whether a single URL currently answers
//
// Redirects are followed up to the client's limit; the terminal status
// decides. Anything below 400 counts as reachable.
pub async fn is_reachable(client: &Client, url: Url) -> bool {
    match client.head(url.clone()).send().await {
        Ok(response) => {
            let status = response.status();
            log::debug!("probe {} -> HTTP {}", url, status);
            is_reachable_status(status)
        }
        Err(e) => {
            log::debug!("probe {} failed: {}", url, e);
            false
        }
    }
}

// Client and server errors both mean "inaccessible"
fn is_reachable_status(status: StatusCode) -> bool {
    status.as_u16() < 400
}
