//! Raw settings document with a typed `updates` section
//!
//! The file is an arbitrary JSON object. Only the `updates` object is
//! interpreted; every other key, and any unknown key inside `updates`,
//! is carried through a rewrite untouched and in its original order.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{Frequency, frequency_serde};
use crate::{Error, Result};

/// Top-level key of the recognized sub-object
pub const UPDATES_KEY: &str = "updates";

/// Key inside `updates` for automatic updates
pub const AUTOMATIC_KEY: &str = "automatic";

/// Key inside `updates` for the check frequency in days
pub const CHECK_FREQUENCY_KEY: &str = "checkFrequency";

/// The recognized `updates` sub-object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Updates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub automatic: Option<bool>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "frequency_serde::stored"
    )]
    pub check_frequency: Option<Frequency>,
}

impl Updates {
    pub fn is_empty(&self) -> bool {
        self.automatic.is_none() && self.check_frequency.is_none()
    }
}

/// A settings file's contents as an ordered key-value map.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    path: PathBuf,
    root: Map<String, Value>,
}

impl Document {
    /// An empty document destined for `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            root: Map::new(),
        }
    }

    /// Decode file content. The top level must be a JSON object.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let path = path.into();
        let value: Value = serde_json::from_str(content).map_err(|e| Error::Decode {
            path: path.clone(),
            message: e.to_string(),
        })?;

        match value {
            Value::Object(root) => Ok(Self { path, root }),
            other => Err(Error::Decode {
                path,
                message: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Extract the typed `updates` section, empty when the key is missing.
    pub fn updates(&self) -> Result<Updates> {
        match self.root.get(UPDATES_KEY) {
            None => Ok(Updates::default()),
            Some(value) => Updates::deserialize(value).map_err(|e| Error::Decode {
                path: self.path.clone(),
                message: format!("invalid '{UPDATES_KEY}' section: {e}"),
            }),
        }
    }

    /// Replace the `updates` section wholesale.
    pub fn set_updates(&mut self, updates: &Updates) -> Result<()> {
        let value = serde_json::to_value(updates).map_err(|e| Error::Encode {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        self.root.insert(UPDATES_KEY.to_string(), value);
        Ok(())
    }

    /// The raw `updates` object, created empty if missing.
    pub fn updates_mut(&mut self) -> Result<&mut Map<String, Value>> {
        let entry = self
            .root
            .entry(UPDATES_KEY)
            .or_insert_with(|| Value::Object(Map::new()));

        match entry {
            Value::Object(map) => Ok(map),
            other => Err(Error::Decode {
                path: self.path.clone(),
                message: format!(
                    "invalid '{UPDATES_KEY}' section: expected an object, found {}",
                    json_kind(other)
                ),
            }),
        }
    }

    /// Encode the whole document with two-space indentation.
    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root).map_err(|e| Error::Encode {
            path: self.path.clone(),
            message: e.to_string(),
        })
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
