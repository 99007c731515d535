//! Error types for tstoy-config

use std::path::PathBuf;

use crate::types::Scope;

/// Result type for tstoy-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating, reading or enforcing settings
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A string did not name any variant of an enumeration
    #[error("unable to convert '{value}' to {kind}, must be one of: {allowed}")]
    InvalidEnumValue {
        kind: &'static str,
        value: String,
        allowed: &'static str,
    },

    /// A numeric setting fell outside its inclusive bounds
    #[error("invalid value {value}; must be an integer between {min} and {max}, inclusive")]
    OutOfRange { value: i64, min: u32, max: u32 },

    /// The desired settings are not internally consistent
    #[error("{message}")]
    Validation { message: String },

    /// The directory for a scope could not be determined
    #[error("could not resolve the {scope} configuration directory: {message}")]
    PathResolution { scope: Scope, message: String },

    /// An existing settings file is not a JSON object with a valid `updates` section
    #[error("failed to decode settings file {path}: {message}")]
    Decode { path: PathBuf, message: String },

    /// The settings document could not be encoded
    #[error("failed to encode settings for {path}: {message}")]
    Encode { path: PathBuf, message: String },

    /// Filesystem error from tstoy-fs
    #[error(transparent)]
    Fs(#[from] tstoy_fs::Error),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Whether the error was raised before any file was touched.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidEnumValue { .. } | Self::OutOfRange { .. } | Self::Validation { .. }
        )
    }
}
