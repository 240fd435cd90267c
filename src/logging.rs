// src/logging.rs
// =============================================================================
// Logging setup for the binary.
//
// Logs go to stderr so they never mix with the links printed on stdout.
// The level comes from RUST_LOG when set; otherwise only warnings are shown,
// or debug output for this crate with --verbose.
// =============================================================================

use anyhow::{anyhow, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) -> Result<()> {
    let default_filter = if verbose {
        "warn,link_harvester=debug"
    } else {
        "warn"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {}", e))?;

    debug!("logging initialized");

    Ok(())
}
