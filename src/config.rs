// src/config.rs
// =============================================================================
// Run settings for the validator.
//
// The CLI is parsed in main.rs and turned into a ValidatorConfig here, so the
// library never has to look at argv or the environment.
// =============================================================================

use std::time::Duration;

use crate::cli::Cli;

/// Timeout for a single external probe.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// How many external probes may be in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 16;

/// Settings for one validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    /// Probe External links over the network.
    pub strict: bool,
    /// Auto-repair was requested. Accepted, but nothing is rewritten.
    pub fix: bool,
    /// Per-probe timeout.
    pub timeout: Duration,
    /// Upper bound on concurrent probes (always at least 1).
    pub concurrency: usize,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            strict: false,
            fix: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl From<&Cli> for ValidatorConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            strict: cli.strict,
            fix: cli.fix,
            timeout: Duration::from_secs(cli.timeout),
            concurrency: cli.concurrency.max(1),
        }
    }
}
