//! Graph-service error types.
//!
//! Traversal guards (`CycleDetected`, `MaxHopsExceeded`) live with the
//! engine in `spl-engine`; this crate only defines the errors a graph
//! backend can raise, so that transports and test mocks share one seam.

use thiserror::Error;

/// Errors raised by a knowledge-graph backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GraphError {
    /// Lookup had no match. Recovered locally by falling back to the next
    /// candidate or pipeline stage.
    #[error("entity not found: {id}")]
    NotFound { id: String },

    /// Network or service failure. Retried with backoff by the client; if
    /// retries are exhausted the query is reported unresolved, never
    /// crashing the batch.
    #[error("transient graph failure: {reason}")]
    Transient { reason: String },

    /// The service returned 429 Too Many Requests.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The service answered but the payload could not be interpreted.
    #[error("malformed graph response: {0}")]
    Malformed(String),
}

impl GraphError {
    /// Whether a retry with backoff can plausibly succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient { .. } | Self::RateLimited { .. })
    }
}
