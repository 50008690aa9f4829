//! Structured logging with tracing
//!
//! Centralized subscriber setup for embedders and tests. The engine
//! itself only emits `tracing` events; initializing a subscriber is the
//! caller's choice.

use bindery_domain::error::{Error, Result};
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize a formatted subscriber.
///
/// The `BINDERY_LOG` environment variable overrides `default_level`
/// (standard `EnvFilter` directives).
pub fn init_logging(default_level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_env("BINDERY_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|error| Error::Resolution {
            message: "logging subscriber already initialized".to_string(),
            source: Some(error),
        })
}
