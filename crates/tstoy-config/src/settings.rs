//! Desired and observed settings for one scope

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::paths::PathResolver;
use crate::types::{Ensure, Frequency, Scope, frequency_serde};
use crate::{Error, Result};

/// The configuration of one scope, either requested by a caller or
/// reconstructed from the file on disk.
///
/// Every field is optional so "unset" stays distinct from `false` or any
/// number. Unset fields are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<Scope>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ensure: Option<Ensure>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_automatically: Option<bool>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "frequency_serde::requested"
    )]
    pub update_frequency: Option<Frequency>,

    /// Resolved settings file path, computed once per instance
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Settings {
    /// Settings targeting `scope` with nothing else specified.
    pub fn for_scope(scope: Scope) -> Self {
        Self {
            scope: Some(scope),
            ..Self::default()
        }
    }

    /// Observed settings for a scope whose file does not exist.
    pub fn absent(scope: Scope) -> Self {
        Self::for_scope(scope).with_ensure(Ensure::Absent)
    }

    pub fn with_ensure(mut self, ensure: Ensure) -> Self {
        self.ensure = Some(ensure);
        self
    }

    pub fn with_update_automatically(mut self, automatic: bool) -> Self {
        self.update_automatically = Some(automatic);
        self
    }

    pub fn with_update_frequency(mut self, frequency: Frequency) -> Self {
        self.update_frequency = Some(frequency);
        self
    }

    /// Parse settings from a JSON object.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::validation(format!("invalid settings JSON: {e}")))
    }

    /// Compact single-line JSON, omitting unset fields.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| Error::Encode {
            path: self.config_path.clone().unwrap_or_default(),
            message: e.to_string(),
        })
    }

    /// Whether the caller asked for the file to be removed.
    ///
    /// An unset ensure means present.
    pub fn is_absent(&self) -> bool {
        self.ensure == Some(Ensure::Absent)
    }

    /// Check the invariants that must hold before any file is touched,
    /// returning the target scope.
    ///
    /// Frequency bounds only matter when the file should exist.
    pub fn validate(&self) -> Result<Scope> {
        let scope = self.validate_scope()?;

        if !self.is_absent()
            && let Some(frequency) = self.update_frequency
        {
            frequency.validate()?;
        }

        Ok(scope)
    }

    /// The settings file path, if it has been resolved.
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Resolve and cache the settings file path for this instance's scope.
    ///
    /// The resolver is consulted at most once per instance.
    pub fn resolve_config_path(&mut self, resolver: &impl PathResolver) -> Result<&Path> {
        let path = match self.config_path.take() {
            Some(path) => path,
            None => resolver.config_path(self.validate_scope()?)?,
        };
        Ok(self.config_path.insert(path).as_path())
    }

    pub(crate) fn set_config_path(&mut self, path: PathBuf) {
        self.config_path = Some(path);
    }

    fn validate_scope(&self) -> Result<Scope> {
        self.scope.ok_or_else(|| {
            Error::validation("the Scope setting isn't defined. Must define a Scope for Settings")
        })
    }
}
