//! HTTP execution with timeout, retry, and exponential backoff.
//!
//! Retries transient failures only:
//! - 5xx server errors
//! - 429 rate limiting
//! - transport-level errors (connection reset, refused)
//!
//! It does NOT retry:
//! - other 4xx client errors (returned to the caller as ordinary responses)
//! - timeouts, which are terminal for the whole call

use std::time::Duration;

use rand::Rng;
use reqwest::{RequestBuilder, Response, StatusCode};
use wxvane_core::{RetryPolicy, WeatherError};

/// Whether re-issuing a request that got this status could plausibly succeed.
pub fn is_retryable_status(status: StatusCode) -> bool {
    status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS
}

/// Backoff delay before retrying `attempt` (0-based): exponential growth
/// scaled by `jitter` and capped at the policy maximum.
fn backoff_delay(policy: &RetryPolicy, attempt: u32, jitter: f64) -> Duration {
    let factor = 2u64.saturating_pow(attempt);
    let base_ms = policy.base_delay.as_millis() as u64;
    let scaled = base_ms.saturating_mul(factor) as f64 * jitter;
    let capped = scaled.min(policy.max_delay.as_millis() as f64);
    Duration::from_millis(capped as u64)
}

/// Uniform jitter factor in `[0.5, 1.0)`, so independent callers retrying the
/// same outage do not synchronize.
fn jitter() -> f64 {
    rand::thread_rng().gen_range(0.5..1.0)
}

/// Execute one logical GET with retries.
///
/// Makes at most `policy.max_retries + 1` attempts. A successful response or
/// a non-retryable failure status is returned immediately; the caller decides
/// how to interpret a non-ok status. A timeout aborts the in-flight request
/// and fails the whole call without consuming further attempts. When the
/// budget is exhausted the last observed failure is wrapped as a network
/// error.
pub async fn fetch_with_retry(
    request: RequestBuilder,
    policy: &RetryPolicy,
) -> Result<Response, WeatherError> {
    let mut last_failure: Option<String> = None;

    for attempt in 0..=policy.max_retries {
        if attempt > 0 {
            let delay = backoff_delay(policy, attempt - 1, jitter());
            tracing::debug!(
                "retry attempt {} of {}, waiting {:?}",
                attempt,
                policy.max_retries,
                delay
            );
            tokio::time::sleep(delay).await;
        }

        let req = request.try_clone().ok_or_else(|| {
            WeatherError::unknown("request cannot be cloned for retry", None)
        })?;

        match tokio::time::timeout(policy.timeout, req.send()).await {
            // Timer fired: dropping the future aborts the in-flight request.
            Err(_) => {
                tracing::warn!(
                    "request timed out after {}ms on attempt {} of {}",
                    policy.timeout.as_millis(),
                    attempt + 1,
                    policy.max_retries + 1
                );
                return Err(WeatherError::timeout(format!(
                    "request timed out after {}ms",
                    policy.timeout.as_millis()
                )));
            }
            Ok(Ok(response)) => {
                let status = response.status();

                if status.is_success() || !is_retryable_status(status) {
                    if attempt > 0 {
                        tracing::debug!("request succeeded after {} retries", attempt);
                    }
                    return Ok(response);
                }

                tracing::warn!(
                    "retryable status {} on attempt {} of {}",
                    status,
                    attempt + 1,
                    policy.max_retries + 1
                );
                last_failure = Some(format!("HTTP {}", status));
            }
            Ok(Err(err)) => {
                tracing::warn!(
                    "transport error on attempt {} of {}: {}",
                    attempt + 1,
                    policy.max_retries + 1,
                    err
                );
                last_failure = Some(err.to_string());
            }
        }
    }

    let message = format!(
        "failed after {} attempts: {}",
        policy.max_retries + 1,
        last_failure.as_deref().unwrap_or("unknown error")
    );
    Err(WeatherError::network(message, last_failure))
}
