//! Tracing subscriber setup

use anyhow::{Context, Result};
use tracing::Level;

/// Install a formatting subscriber writing to stderr at `level`.
///
/// Calling this more than once is harmless; later calls keep the first
/// subscriber.
pub fn init_logging(level: &str) -> Result<()> {
    let level: Level = level
        .parse()
        .with_context(|| format!("Unknown log level: {}", level))?;

    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_names(true)
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}
