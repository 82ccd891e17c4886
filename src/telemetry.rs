//! Tracing subscriber setup for the server binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

/// Directive applied when neither a filter nor `RUST_LOG` is given.
pub const DEFAULT_FILTER: &str = "taskboard=info,tower_http=info";

/// Builds the filter from an explicit directive string, `RUST_LOG`, or the
/// default, in that order.
///
/// # Errors
///
/// Returns [`ParseError`] when `directives` is not a valid filter.
pub fn env_filter(directives: Option<&str>) -> Result<EnvFilter, ParseError> {
    match directives {
        Some(value) => EnvFilter::try_new(value),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))),
    }
}

/// Installs a formatting subscriber as the global default.
///
/// # Errors
///
/// Returns an error when the filter is invalid or a global subscriber is
/// already installed.
pub fn init(directives: Option<&str>) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives)?)
        .with_target(true)
        .try_init()
}
