//! Retry/backoff policy for graph queries.
//!
//! A policy object (max attempts, base delay, jitter) injected into the
//! client so backoff behavior is configurable and, with jitter disabled,
//! fully deterministic under test.

use std::time::Duration;

use spl_core::GraphError;

/// Exponential-backoff policy for transient graph failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first (1 means no retries).
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent one.
    pub base_delay: Duration,
    /// Add up to half the base delay of randomness to each backoff.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// Whether another attempt is allowed after `attempt` failures.
    #[must_use]
    pub const fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Backoff before retrying after the given failed attempt (1-based).
    ///
    /// Exponential in the attempt number; a server-provided `Retry-After`
    /// acts as a floor so the policy never undercuts the service's own
    /// rate-limit window.
    #[must_use]
    pub fn delay_for(&self, attempt: u32, error: &GraphError) -> Duration {
        let exponential = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)));

        let floor = match error {
            GraphError::RateLimited { retry_after_secs } => Duration::from_secs(*retry_after_secs),
            _ => Duration::ZERO,
        };

        let mut delay = exponential.max(floor);
        if self.jitter {
            delay += jitter_within(self.base_delay / 2);
        }
        delay
    }
}

/// Uniform-ish random duration in `[0, window)`; zero when the window is
/// empty or entropy is unavailable.
fn jitter_within(window: Duration) -> Duration {
    let window_ms = window.as_millis().min(u128::from(u64::MAX)) as u64;
    if window_ms == 0 {
        return Duration::ZERO;
    }
    let mut buf = [0u8; 8];
    if getrandom::fill(&mut buf).is_err() {
        return Duration::ZERO;
    }
    Duration::from_millis(u64::from_le_bytes(buf) % window_ms)
}
