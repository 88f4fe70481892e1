//! Log output for the command-line front end.
//!
//! `visums-core` logs through the `log` facade; those records are bridged
//! into a `tracing` fmt subscriber writing to stderr, so stdout only carries
//! command output.
use tracing_subscriber::{EnvFilter, fmt};

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` raises the level to debug.
pub fn init(verbose: bool) -> Result<(), String> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "debug" } else { DEFAULT_FILTER })
    });

    tracing_log::LogTracer::init()
        .map_err(|e| format!("Failed to bridge log records: {}", e))?;

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| format!("Failed to install log subscriber: {}", e))
}
