//! Settings file locations

use std::io::Write;

use tstoy_config::{ConfigStore, PathResolver, Scope};

use crate::error::Result;

/// Print the settings file path for each scope, machine then user when
/// `scopes` is empty.
pub fn run_show_path<R: PathResolver>(
    store: &ConfigStore<R>,
    scopes: &[Scope],
    out: &mut impl Write,
) -> Result<()> {
    let scopes = if scopes.is_empty() { &Scope::ALL[..] } else { scopes };

    for &scope in scopes {
        writeln!(out, "{}", store.resolve_path(scope)?.display())?;
    }
    Ok(())
}
