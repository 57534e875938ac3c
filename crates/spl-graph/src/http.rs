//! Shared HTTP response triage for the graph client.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, 5xx as retryable transient failures, other non-success as
//! malformed) so the request modules stay focused on parameter
//! construction and response mapping.

use spl_core::GraphError;

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** → [`GraphError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **5xx / 408** → [`GraphError::Transient`] (retryable).
/// - **Other non-success** → [`GraphError::Malformed`] with status and body.
pub(crate) async fn check_response(
    resp: reqwest::Response,
) -> Result<reqwest::Response, GraphError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(GraphError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if status.is_server_error() || status == reqwest::StatusCode::REQUEST_TIMEOUT {
        return Err(GraphError::Transient {
            reason: format!("service returned {status}"),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(GraphError::Malformed(format!("status {status}: {body}")));
    }
    Ok(resp)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Map a reqwest transport error onto the graph error taxonomy. Timeouts
/// and connection failures are retryable; everything else is malformed
/// plumbing.
pub(crate) fn transport_error(err: &reqwest::Error) -> GraphError {
    if err.is_timeout() || err.is_connect() || err.is_request() {
        GraphError::Transient {
            reason: err.to_string(),
        }
    } else {
        GraphError::Malformed(err.to_string())
    }
}
