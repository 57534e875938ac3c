//! Retry/backoff configuration for graph requests.

use serde::{Deserialize, Serialize};

/// Default total attempts per request (1 initial + 2 retries).
const fn default_max_attempts() -> u32 {
    3
}

/// Default backoff base delay in milliseconds.
const fn default_base_delay_ms() -> u64 {
    500
}

/// Default jitter setting.
const fn default_jitter() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RetryConfig {
    /// Total attempts per request, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay for exponential backoff, in milliseconds.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// Whether to add random jitter to each backoff delay.
    #[serde(default = "default_jitter")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            jitter: default_jitter(),
        }
    }
}
