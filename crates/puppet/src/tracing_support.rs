//! Log output for test runs.
//!
//! Components emit `tracing` events when they compose selectors and hand them
//! to the driver. Call [`init_tracing`] once at the top of a test to see them.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the filter directives
pub const LOG_ENV: &str = "PUPPET_LOG";

/// Filter used when [`LOG_ENV`] is unset or invalid
pub const DEFAULT_FILTER: &str = "warn";

/// Build the filter from [`LOG_ENV`]
#[must_use]
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Install a test-friendly fmt subscriber.
///
/// Safe to call from every test: only the first call installs anything, and
/// an already installed global subscriber is left alone.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(env_filter())
            .with_test_writer()
            .try_init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init_tracing();
        init_tracing();
        tracing::debug!("still alive");
    }

    #[test]
    fn test_env_filter_builds() {
        let filter = env_filter();
        assert!(!filter.to_string().is_empty());
    }
}
