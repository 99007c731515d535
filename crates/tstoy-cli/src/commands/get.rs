//! Query-only state inspection

use std::io::Write;

use tstoy_config::{ConfigStore, PathResolver, Scope, Settings};

use crate::cli::SettingsArgs;
use crate::error::Result;

/// Print the observed settings for the requested scopes, one JSON object
/// per line.
///
/// Scope precedence: `all`, then `--scope`, then the JSON input. With none
/// of them the scope is undefined and validation fails.
pub fn run_get<R: PathResolver>(
    store: &ConfigStore<R>,
    all: bool,
    args: &SettingsArgs,
    input: Option<Settings>,
    out: &mut impl Write,
) -> Result<()> {
    let scopes = if all {
        Scope::ALL.to_vec()
    } else if let Some(scope) = args.scope {
        vec![scope]
    } else {
        vec![input.unwrap_or_default().validate()?]
    };

    for scope in scopes {
        let observed = store.load_observed_settings(scope)?;
        writeln!(out, "{}", observed.to_json()?)?;
    }
    Ok(())
}
