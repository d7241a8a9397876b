//! Tracing setup for the resolvgen binary.
//!
//! Logs go to stderr so stdout stays reserved for stage markers and
//! `--dump-model` output.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV_VAR: &str = "RESOLVGEN_LOG";

/// Install the global fmt subscriber.
///
/// `default_level` is used when `RESOLVGEN_LOG` is unset or invalid. Calling
/// this more than once is harmless: later calls leave the first subscriber
/// in place.
pub fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
