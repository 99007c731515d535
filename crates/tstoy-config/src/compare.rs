//! Read-only desired-state check

use serde::Serialize;

use crate::paths::PathResolver;
use crate::settings::Settings;
use crate::store::ConfigStore;
use crate::types::Ensure;
use crate::Result;

/// Outcome of comparing desired settings with the file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestReport {
    pub in_desired_state: bool,
    pub actual_state: Settings,
    pub differing_properties: Vec<&'static str>,
}

impl<R: PathResolver> ConfigStore<R> {
    /// Check whether the file for `desired.scope` already matches `desired`.
    ///
    /// Only properties the caller set are compared. Update fields are
    /// ignored when the file should be absent. Nothing is written.
    pub fn test(&self, desired: &Settings) -> Result<TestReport> {
        let scope = desired.validate()?;
        let actual = self.load_observed_settings(scope)?;

        let differing_properties = differing_properties(desired, &actual);
        tracing::debug!(scope = %scope, differing = ?differing_properties, "tested settings");

        Ok(TestReport {
            in_desired_state: differing_properties.is_empty(),
            actual_state: actual,
            differing_properties,
        })
    }
}

fn differing_properties(desired: &Settings, actual: &Settings) -> Vec<&'static str> {
    let wanted_ensure = desired.ensure.unwrap_or(Ensure::Present);
    let actual_ensure = actual.ensure.unwrap_or(Ensure::Absent);

    let mut differing = Vec::new();
    if wanted_ensure != actual_ensure {
        differing.push("ensure");
    }
    if wanted_ensure == Ensure::Absent {
        return differing;
    }

    if desired.update_automatically.is_some()
        && desired.update_automatically != actual.update_automatically
    {
        differing.push("updateAutomatically");
    }
    if desired.update_frequency.is_some() && desired.update_frequency != actual.update_frequency {
        differing.push("updateFrequency");
    }
    differing
}
