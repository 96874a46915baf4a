//! Core support for the wxvane weather client.
//!
//! Provides the typed error taxonomy, the `LoaderResult` consumer contract,
//! the two failure-handling strategies, and client configuration.

pub mod config;
pub mod error;
pub mod loader;

pub use config::{ConfigError, NwsConfig, RetryPolicy};
pub use error::{ErrorKind, LoaderResult, ValidationIssue, WeatherError};
pub use loader::{with_error_handling, with_graceful_fallback};

use anyhow::Result;

/// Initialize logging for binaries built on the client core.
pub fn init() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::debug!("wxvane core initialized");
    Ok(())
}
