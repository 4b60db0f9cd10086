//! Verbosity levels and `tracing` subscriber setup.
//!
//! Verbosity levels:
//! - 0: SILENT (only warnings and errors)
//! - 1: CHANGES (files read and written, critical chain)
//! - 2: CHECKS (stage summaries, loaded task records)
//! - 3: DEBUG (per-task timings from each pass)

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Map a verbosity level to a `tracing` level filter. Levels above DEBUG saturate.
pub fn level_filter(verbosity: u8) -> LevelFilter {
    match verbosity {
        VERBOSITY_SILENT => LevelFilter::WARN,
        VERBOSITY_CHANGES => LevelFilter::INFO,
        VERBOSITY_CHECKS => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a stderr fmt subscriber. `RUST_LOG` overrides `verbosity` when set.
///
/// Returns an error if a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    use std::io::IsTerminal;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::builder()
        .with_default_directive(level_filter(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false),
        )
        .with(filter)
        .try_init()
}
