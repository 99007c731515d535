//! [`TestScopes`] fixture: isolated machine and user config directories.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde_json::Value;
use tempfile::TempDir;

/// Name of the settings file inside each scope directory.
pub const CONFIG_FILE: &str = "config.json";

/// Environment variable overriding the machine scope directory.
pub const MACHINE_DIR_ENV: &str = "TSTOY_MACHINE_CONFIG_DIR";

/// Environment variable overriding the user scope directory.
pub const USER_DIR_ENV: &str = "TSTOY_USER_CONFIG_DIR";

/// Temporary root holding a `machine/` and a `user/` scope directory.
///
/// Neither directory is created up front, so a fresh fixture starts with
/// both settings files absent.
///
/// # Example
///
/// ```rust,no_run
/// use tstoy_test_utils::TestScopes;
///
/// let scopes = TestScopes::new();
/// scopes.write_config("user", r#"{"updates": {"checkFrequency": 30}}"#);
/// scopes.assert_config_exists("user");
/// scopes.assert_config_absent("machine");
/// ```
pub struct TestScopes {
    temp_dir: TempDir,
}

impl Default for TestScopes {
    fn default() -> Self {
        Self::new()
    }
}

impl TestScopes {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn machine_dir(&self) -> PathBuf {
        self.root().join("machine")
    }

    pub fn user_dir(&self) -> PathBuf {
        self.root().join("user")
    }

    /// Settings file path for `scope` (`"machine"` or `"user"`).
    ///
    /// # Panics
    /// Panics on any other scope name.
    pub fn config_path(&self, scope: &str) -> PathBuf {
        let dir = match scope {
            "machine" => self.machine_dir(),
            "user" => self.user_dir(),
            other => panic!("unknown scope in test: {other}"),
        };
        dir.join(CONFIG_FILE)
    }

    /// Environment overrides pointing both scopes into this fixture.
    pub fn env(&self) -> [(&'static str, PathBuf); 2] {
        [
            (MACHINE_DIR_ENV, self.machine_dir()),
            (USER_DIR_ENV, self.user_dir()),
        ]
    }

    /// Write raw content as the settings file for `scope`, creating the
    /// directory if needed.
    pub fn write_config(&self, scope: &str, content: &str) -> PathBuf {
        let path = self.config_path(scope);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, content).unwrap();
        path
    }

    /// Make every write to the settings file of `scope` fail while reads
    /// still report it as absent.
    ///
    /// The settings path becomes a symlink to `pending/config.json`, and
    /// `pending` is itself a dangling symlink, so the directory a write
    /// needs can never be created. Works regardless of the user running
    /// the tests.
    #[cfg(unix)]
    pub fn block_writes(&self, scope: &str) -> PathBuf {
        use std::os::unix::fs::symlink;

        let path = self.config_path(scope);
        let dir = path.parent().unwrap();
        fs::create_dir_all(dir).unwrap();
        symlink("nowhere", dir.join("pending")).unwrap();
        symlink(Path::new("pending").join(CONFIG_FILE), &path).unwrap();
        path
    }

    pub fn read_config(&self, scope: &str) -> String {
        let path = self.config_path(scope);
        fs::read_to_string(&path)
            .unwrap_or_else(|e| panic!("Could not read {}: {e}", path.display()))
    }

    pub fn read_json(&self, scope: &str) -> Value {
        serde_json::from_str(&self.read_config(scope)).unwrap()
    }

    pub fn modified(&self, scope: &str) -> SystemTime {
        fs::metadata(self.config_path(scope))
            .and_then(|m| m.modified())
            .unwrap()
    }

    pub fn config_exists(&self, scope: &str) -> bool {
        self.config_path(scope).exists()
    }

    /// # Panics
    /// Panics if the settings file for `scope` does not exist.
    pub fn assert_config_exists(&self, scope: &str) {
        let path = self.config_path(scope);
        assert!(path.exists(), "Expected file to exist: {}", path.display());
    }

    /// # Panics
    /// Panics if the settings file for `scope` exists.
    pub fn assert_config_absent(&self, scope: &str) {
        let path = self.config_path(scope);
        assert!(!path.exists(), "Expected file NOT to exist: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_fixture_has_no_config() {
        let scopes = TestScopes::new();
        scopes.assert_config_absent("machine");
        scopes.assert_config_absent("user");
        assert!(!scopes.machine_dir().exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_block_writes_leaves_dangling_link() {
        let scopes = TestScopes::new();
        let path = scopes.block_writes("machine");

        assert!(fs::symlink_metadata(&path).unwrap().file_type().is_symlink());
        assert!(!path.exists());
    }

    #[test]
    fn test_write_then_read() {
        let scopes = TestScopes::new();
        let path = scopes.write_config("user", r#"{"a": 1}"#);

        assert_eq!(path, scopes.user_dir().join("config.json"));
        assert_eq!(scopes.read_json("user")["a"], 1);
    }
}
