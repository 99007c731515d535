//! Enforce desired settings

use std::io::Write;

use tstoy_config::{ConfigStore, PathResolver, Settings};

use crate::cli::SettingsArgs;
use crate::error::Result;

/// Enforce the settings built from `input` with `args` layered on top and
/// print the effective settings.
///
/// When enforcing fails after the file was read, the observed state is
/// printed before the error is returned.
pub fn run_set<R: PathResolver>(
    store: &ConfigStore<R>,
    args: &SettingsArgs,
    input: Option<Settings>,
    out: &mut impl Write,
) -> Result<()> {
    let desired = args.apply(input.unwrap_or_default())?;

    match store.enforce(&desired) {
        Ok(enforcement) => {
            tracing::debug!(action = %enforcement.action, "set complete");
            writeln!(out, "{}", enforcement.settings.to_json()?)?;
            Ok(())
        }
        Err(err) => {
            if let Some(observed) = &err.observed {
                writeln!(out, "{}", observed.to_json()?)?;
            }
            Err(err.into())
        }
    }
}
