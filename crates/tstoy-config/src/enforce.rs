//! Reconciliation engine
//!
//! Compares desired settings with what is on disk and applies the smallest
//! change that makes the file match: create, update, delete, or nothing.
//!
//! Every write replaces the whole file. There is no lock spanning the
//! read-modify-write, so two processes enforcing the same scope at once race
//! and the last writer wins.

use std::fmt;
use std::path::PathBuf;

use serde_json::Value;
use tstoy_fs::io;

use crate::document::{AUTOMATIC_KEY, CHECK_FREQUENCY_KEY, Document, Updates};
use crate::paths::PathResolver;
use crate::settings::Settings;
use crate::store::{ConfigStore, Observation};
use crate::types::Ensure;
use crate::Error;

/// What enforcing did to the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// The file already matched; nothing was written
    Unchanged,
    Created,
    Updated,
    Deleted,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unchanged => "unchanged",
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
        };
        f.write_str(name)
    }
}

/// Successful enforcement: the effective settings and the action taken.
#[derive(Debug, Clone, PartialEq)]
pub struct Enforcement {
    pub settings: Settings,
    pub action: Action,
}

/// A failed enforcement, with the last known on-disk state when the
/// failure happened after the file was observed.
#[derive(Debug, thiserror::Error)]
#[error("{source}")]
pub struct EnforceError {
    #[source]
    pub source: Error,
    pub observed: Option<Settings>,
}

impl EnforceError {
    fn before_observe(source: Error) -> Self {
        Self {
            source,
            observed: None,
        }
    }

    fn after_observe(source: impl Into<Error>, observed: &Settings) -> Self {
        Self {
            source: source.into(),
            observed: Some(observed.clone()),
        }
    }
}

impl<R: PathResolver> ConfigStore<R> {
    /// Make the settings file for `desired.scope` match `desired`.
    ///
    /// Validation runs before any I/O. On success the returned settings are
    /// `desired` with the resolved path attached and an unset ensure
    /// resolved to present.
    pub fn enforce(&self, desired: &Settings) -> Result<Enforcement, EnforceError> {
        let scope = desired.validate().map_err(EnforceError::before_observe)?;

        let mut effective = desired.clone();
        let path = effective
            .resolve_config_path(self.resolver())
            .map_err(EnforceError::before_observe)?
            .to_path_buf();

        let observation = self
            .observe_at(scope, path.clone())
            .map_err(EnforceError::before_observe)?;

        let action = if desired.is_absent() {
            self.remove(&observation)?
        } else {
            effective.ensure = Some(Ensure::Present);
            match &observation.document {
                None => self.create(desired, path, &observation.settings)?,
                Some(document) => self.update(desired, document.clone(), &observation.settings)?,
            }
        };

        tracing::info!(scope = %scope, action = %action, "enforced settings");
        Ok(Enforcement {
            settings: effective,
            action,
        })
    }

    fn remove(&self, observation: &Observation) -> Result<Action, EnforceError> {
        let Some(document) = &observation.document else {
            tracing::debug!("settings file already absent");
            return Ok(Action::Unchanged);
        };

        let removed = io::remove(document.path())
            .map_err(|e| EnforceError::after_observe(e, &observation.settings))?;
        if !removed {
            tracing::warn!(path = %document.path().display(), "settings file vanished before removal");
        }
        Ok(Action::Deleted)
    }

    fn create(
        &self,
        desired: &Settings,
        path: PathBuf,
        observed: &Settings,
    ) -> Result<Action, EnforceError> {
        let fail = |e: Error| EnforceError::after_observe(e, observed);
        let mut document = Document::new(path);

        let updates = Updates {
            automatic: desired.update_automatically,
            check_frequency: desired.update_frequency,
        };
        if !updates.is_empty() {
            document.set_updates(&updates).map_err(fail)?;
        }

        write(&document).map_err(fail)?;
        Ok(Action::Created)
    }

    fn update(
        &self,
        desired: &Settings,
        mut document: Document,
        observed: &Settings,
    ) -> Result<Action, EnforceError> {
        let fail = |e: Error| EnforceError::after_observe(e, observed);

        let staged = stage_changes(&mut document, desired, observed).map_err(fail)?;
        if staged.is_empty() {
            tracing::debug!("settings already in desired state");
            return Ok(Action::Unchanged);
        }

        tracing::debug!(changed = ?staged, "staged settings changes");
        write(&document).map_err(fail)?;
        Ok(Action::Updated)
    }
}

/// Apply each field `desired` specifies and `observed` lacks or disagrees
/// with. Fields `desired` leaves unset keep whatever the document holds.
/// Returns the names of the changed properties.
fn stage_changes(
    document: &mut Document,
    desired: &Settings,
    observed: &Settings,
) -> crate::Result<Vec<&'static str>> {
    let updates = document.updates_mut()?;
    let mut staged = Vec::new();

    if let Some(automatic) = desired.update_automatically
        && observed.update_automatically != Some(automatic)
    {
        updates.insert(AUTOMATIC_KEY.to_string(), Value::Bool(automatic));
        staged.push("updateAutomatically");
    }

    if let Some(frequency) = desired.update_frequency
        && observed.update_frequency != Some(frequency)
    {
        updates.insert(CHECK_FREQUENCY_KEY.to_string(), Value::from(frequency.days()));
        staged.push("updateFrequency");
    }

    Ok(staged)
}

fn write(document: &Document) -> crate::Result<()> {
    let content = document.to_json_pretty()?;
    io::write_text(document.path(), &content)?;
    tracing::debug!(path = %document.path().display(), "wrote settings file");
    Ok(())
}
