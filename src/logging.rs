//! Logging setup for the `eda` binary.

use tracing_subscriber::EnvFilter;

use crate::error::{EdaError, EdaResult};

/// Map CLI verbosity flags to a log level: quiet → ERROR, 0 → INFO, 1 → DEBUG, 2+ → TRACE.
pub fn level_for(verbose: u8, quiet: bool) -> tracing::Level {
    match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::INFO,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    }
}

/// Initializes a stderr `tracing` subscriber.
///
/// `RUST_LOG`, when set, overrides the level derived from `verbose`/`quiet`.
///
/// ```rust,no_run
/// eda_report::logging::init_logging(1, false).expect("logging already initialized");
/// ```
pub fn init_logging(verbose: u8, quiet: bool) -> EdaResult<()> {
    let level = level_for(verbose, quiet);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .try_init()
        .map_err(|e| EdaError::invalid(format!("failed to initialize logging: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::level_for;

    // A global subscriber can only be installed once per process, so only the mapping is tested.
    #[test]
    fn verbosity_levels() {
        let cases = [
            ((true, 0), tracing::Level::ERROR),
            ((true, 5), tracing::Level::ERROR),
            ((false, 0), tracing::Level::INFO),
            ((false, 1), tracing::Level::DEBUG),
            ((false, 2), tracing::Level::TRACE),
            ((false, 9), tracing::Level::TRACE),
        ];
        for ((quiet, verbose), expected) in cases {
            assert_eq!(level_for(verbose, quiet), expected);
        }
    }
}
