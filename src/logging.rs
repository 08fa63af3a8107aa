//! Log subscriber setup for the command-line driver

use crate::constants::config::{DEFAULT_LOG_FILTER, LOG_ENV};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber filtered by `RUST_LOG`.
///
/// `verbose` raises the default level to debug when the environment is silent.
/// Calling this twice is harmless; the second install is ignored.
pub fn init(verbose: bool) {
    let default = if verbose { "debug" } else { DEFAULT_LOG_FILTER };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
