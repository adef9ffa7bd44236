//! Logging bootstrap.
//!
//! Diagnostics go to stderr so they never mix with command output on
//! stdout. The filter comes from `RUST_LOG` and defaults to warnings only.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "pinitup=warn";

/// Install the global subscriber. Later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
