//! Tracing setup. Logs go to stderr; stdout is reserved for JSON output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, Result};

/// Install the global subscriber.
///
/// `RUST_LOG` selects the level, defaulting to `warn`. `verbose` forces
/// `debug`.
pub fn init(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn"))
            .map_err(|e| CliError::user(format!("invalid log filter: {e}")))?
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| CliError::user(format!("failed to initialize logging: {e}")))?;

    tracing::debug!("logging initialized");
    Ok(())
}
