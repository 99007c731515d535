//! JSON input from `--input` or piped stdin

use std::io::{self, IsTerminal, Read};

use tstoy_config::Settings;

use crate::error::Result;

/// Settings supplied as JSON, if any.
///
/// An explicit `--input` wins; otherwise stdin is read when it is not a
/// terminal. Blank input counts as none.
pub fn load(explicit: Option<&str>) -> Result<Option<Settings>> {
    match explicit {
        Some(json) => parse(json),
        None => match read_stdin()? {
            Some(json) => parse(&json),
            None => Ok(None),
        },
    }
}

fn read_stdin() -> Result<Option<String>> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(Some(buffer))
}

fn parse(json: &str) -> Result<Option<Settings>> {
    let json = json.trim();
    if json.is_empty() {
        return Ok(None);
    }
    tracing::debug!(input = json, "parsing settings input");
    Ok(Some(Settings::from_json(json)?))
}
