//! Resolution pipeline configuration.

use serde::{Deserialize, Serialize};

/// Default combined successor + parent hop cap per candidate.
const fn default_max_hops() -> usize {
    10
}

/// Default number of sponsors resolved concurrently.
const fn default_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    /// Maximum succession + ownership hops walked per candidate before the
    /// traversal is abandoned.
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,

    /// How many sponsor queries are resolved in flight at once.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_hops: default_max_hops(),
            concurrency: default_concurrency(),
        }
    }
}

impl ResolverConfig {
    /// Concurrency clamped to at least one in-flight resolution.
    #[must_use]
    pub fn effective_concurrency(&self) -> usize {
        self.concurrency.max(1)
    }
}
