//! Scope to settings-file path resolution
//!
//! The machine scope lives in a system-wide directory, the user scope in the
//! platform's per-user config directory:
//! - Linux/macOS: `/etc/tstoy/config.json` and `~/.config/tstoy/config.json`
//!   (`dirs::config_dir()`, so `~/Library/Application Support` on macOS)
//! - Windows: `%PROGRAMDATA%\tstoy\config.json` and `%APPDATA%\tstoy\config.json`

use std::path::PathBuf;

use crate::types::Scope;
use crate::{Error, Result};

/// Application directory name under each scope root
pub const APP_DIR: &str = "tstoy";

/// Settings file stem
pub const FILE_NAME: &str = "config";

/// Settings file extension
pub const FILE_EXTENSION: &str = "json";

/// Maps a scope to the directory holding its settings file.
///
/// Implementations must be deterministic: the same scope yields the same
/// directory for the life of the process.
pub trait PathResolver {
    /// Directory that holds the settings file for `scope`.
    fn scope_dir(&self, scope: Scope) -> Result<PathBuf>;

    /// Full path of the settings file for `scope`.
    fn config_path(&self, scope: Scope) -> Result<PathBuf> {
        Ok(self
            .scope_dir(scope)?
            .join(format!("{FILE_NAME}.{FILE_EXTENSION}")))
    }
}

/// Platform default locations, with optional per-scope overrides.
#[derive(Debug, Clone, Default)]
pub struct ScopePaths {
    machine_dir: Option<PathBuf>,
    user_dir: Option<PathBuf>,
}

impl ScopePaths {
    /// Resolve both scopes to the platform defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve both scopes under explicit directories.
    pub fn rooted(machine_dir: impl Into<PathBuf>, user_dir: impl Into<PathBuf>) -> Self {
        Self {
            machine_dir: Some(machine_dir.into()),
            user_dir: Some(user_dir.into()),
        }
    }

    /// Use `dir` for the machine scope instead of the platform default.
    pub fn with_machine_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.machine_dir = dir;
        }
        self
    }

    /// Use `dir` for the user scope instead of the platform default.
    pub fn with_user_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.user_dir = dir;
        }
        self
    }
}

impl PathResolver for ScopePaths {
    fn scope_dir(&self, scope: Scope) -> Result<PathBuf> {
        let overridden = match scope {
            Scope::Machine => &self.machine_dir,
            Scope::User => &self.user_dir,
        };
        if let Some(dir) = overridden {
            return Ok(dir.clone());
        }

        match scope {
            Scope::Machine => Ok(machine_root().join(APP_DIR)),
            Scope::User => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR))
                .ok_or_else(|| Error::PathResolution {
                    scope,
                    message: "the platform has no per-user config directory".into(),
                }),
        }
    }
}

#[cfg(windows)]
fn machine_root() -> PathBuf {
    std::env::var_os("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
}

#[cfg(not(windows))]
fn machine_root() -> PathBuf {
    PathBuf::from("/etc")
}
