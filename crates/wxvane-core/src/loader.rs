//! Failure-handling strategies for composing client operations.
//!
//! Two strategies cover every caller:
//! - [`with_error_handling`] for must-have data: the caller always gets a
//!   [`LoaderResult`] back, never a panic or an unclassified error.
//! - [`with_graceful_fallback`] for nice-to-have data: failures degrade to a
//!   caller-supplied fallback and are recorded as warnings only.

use std::future::Future;

use crate::error::{LoaderResult, WeatherError};

/// Run `operation` and wrap the outcome as a [`LoaderResult`].
///
/// A failure that is already a [`WeatherError`] passes through unchanged;
/// anything else is wrapped as an unknown, non-retryable error carrying the
/// original failure as details. Every failure is logged at error severity
/// before being returned.
pub async fn with_error_handling<T, F>(context: &str, operation: F) -> LoaderResult<T>
where
    F: Future<Output = anyhow::Result<T>>,
{
    match operation.await {
        Ok(data) => LoaderResult::ok(data),
        Err(err) => {
            tracing::error!("{}: {:#}", context, err);
            match err.downcast::<WeatherError>() {
                Ok(weather) => LoaderResult::err(weather),
                Err(other) => LoaderResult::err(WeatherError::unknown(
                    context,
                    Some(format!("{:#}", other)),
                )),
            }
        }
    }
}

/// Run `operation`, returning `fallback` on any failure.
///
/// Failures are logged at warning severity and never propagate; use this for
/// secondary data that must not block the primary response.
pub async fn with_graceful_fallback<T, F>(context: &str, operation: F, fallback: T) -> T
where
    F: Future<Output = anyhow::Result<T>>,
{
    match operation.await {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!("{}: {:#}", context, err);
            fallback
        }
    }
}
