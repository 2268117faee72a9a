//! Tracing subscriber setup for the binary
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the binary so embedders keep control of their own logging.

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

/// Default filter directive for the given verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "siteledger=debug"
    } else {
        "siteledger=warn"
    }
}

/// Install the global subscriber, writing to stderr
///
/// `RUST_LOG` wins over the default directive when it is set. Only the first
/// call has any effect.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

        // A subscriber installed by an embedding application is left in place
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
