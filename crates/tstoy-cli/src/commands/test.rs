//! Desired-state check without writing

use std::io::Write;

use tstoy_config::{ConfigStore, PathResolver, Settings};

use crate::cli::SettingsArgs;
use crate::error::Result;

pub fn run_test<R: PathResolver>(
    store: &ConfigStore<R>,
    args: &SettingsArgs,
    input: Option<Settings>,
    out: &mut impl Write,
) -> Result<()> {
    let desired = args.apply(input.unwrap_or_default())?;
    let report = store.test(&desired)?;
    writeln!(out, "{}", serde_json::to_string(&report)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fixtures::{lines, store};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tstoy_config::Scope;
    use tstoy_test_utils::TestScopes;

    #[test]
    fn test_reports_differences() {
        let scopes = TestScopes::new();
        scopes.write_config("machine", r#"{"updates": {"checkFrequency": 5}}"#);
        let args = SettingsArgs {
            scope: Some(Scope::Machine),
            update_frequency: Some(6),
            ..SettingsArgs::default()
        };
        let mut out = Vec::new();

        run_test(&store(&scopes), &args, None, &mut out).unwrap();

        assert_eq!(
            lines(out),
            vec![json!({
                "inDesiredState": false,
                "actualState": {"scope": "machine", "ensure": "present", "updateFrequency": 5},
                "differingProperties": ["updateFrequency"]
            })]
        );
        assert_eq!(scopes.read_json("machine"), json!({"updates": {"checkFrequency": 5}}));
    }
}
