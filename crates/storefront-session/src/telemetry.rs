//! Logging setup for hosts embedding the session.

use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Installs a global `fmt` subscriber.
///
/// `RUST_LOG` wins; otherwise `filter` is used, and if that does not parse
/// either, [`DEFAULT_LOG_FILTER`]. Returns false when a global subscriber
/// was already installed, so calling it twice is harmless.
pub fn init_tracing(filter: &str) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .try_init()
        .is_ok()
}
