// src/config.rs
// =============================================================================
// Read-only analyzer configuration.
//
// One value is built per invocation and passed by reference everywhere -
// including into every concurrent probe task. Nothing in here is ever
// mutated after construction, so sharing it across tasks needs no locking.
// =============================================================================

use std::time::Duration;

// Some servers reject requests without a realistic browser User-Agent,
// so we send one by default.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/58.0.3029.110 Safari/537.36";

// Settings shared by the page fetch and all liveness probes
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// User-Agent header sent with every outbound request
    pub user_agent: String,
    /// Per-request timeout (page fetch and each individual probe)
    pub probe_timeout: Duration,
    /// Maximum number of liveness probes in flight at once
    pub max_concurrent_probes: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            probe_timeout: Duration::from_secs(10),
            max_concurrent_probes: 50,
        }
    }
}
