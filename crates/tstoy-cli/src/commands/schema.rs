//! Resource schema output

use std::io::Write;

use tstoy_config::resource_schema;

use crate::error::Result;

pub fn run_schema(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", serde_json::to_string_pretty(&resource_schema())?)?;
    Ok(())
}
