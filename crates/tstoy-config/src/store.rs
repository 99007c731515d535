//! Store accessor: path resolution and observed-state loading

use std::path::{Path, PathBuf};

use tstoy_fs::io;

use crate::document::Document;
use crate::paths::{PathResolver, ScopePaths};
use crate::settings::Settings;
use crate::types::{Ensure, Scope};
use crate::Result;

/// What is on disk for one scope: the settings reconstructed from the file
/// and, when the file exists, the raw document for merge-back.
#[derive(Debug, Clone)]
pub struct Observation {
    pub settings: Settings,
    pub document: Option<Document>,
}

impl Observation {
    pub fn is_absent(&self) -> bool {
        self.document.is_none()
    }
}

/// Reads and enforces the settings file of each scope.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore<R = ScopePaths> {
    resolver: R,
}

impl<R: PathResolver> ConfigStore<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    /// Settings file path for `scope`. No I/O.
    pub fn resolve_path(&self, scope: Scope) -> Result<PathBuf> {
        self.resolver.config_path(scope)
    }

    /// Read and decode the document at `path`.
    ///
    /// `Ok(None)` means the file does not exist; any other read failure or
    /// undecodable content is an error.
    pub fn read_document(&self, path: &Path) -> Result<Option<Document>> {
        match io::read_text(path)? {
            None => {
                tracing::debug!(path = %path.display(), "settings file not found");
                Ok(None)
            }
            Some(content) => Document::parse(path, &content).map(Some),
        }
    }

    /// Observed settings for `scope`. A missing file is reported as
    /// `ensure = absent`, never as an error.
    pub fn load_observed_settings(&self, scope: Scope) -> Result<Settings> {
        let path = self.resolve_path(scope)?;
        Ok(self.observe_at(scope, path)?.settings)
    }

    /// Observe `scope` through the file at `path`, keeping the raw document.
    pub(crate) fn observe_at(&self, scope: Scope, path: PathBuf) -> Result<Observation> {
        let Some(document) = self.read_document(&path)? else {
            let mut settings = Settings::absent(scope);
            settings.set_config_path(path);
            return Ok(Observation {
                settings,
                document: None,
            });
        };

        let updates = document.updates()?;
        let mut settings = Settings::for_scope(scope).with_ensure(Ensure::Present);
        settings.update_automatically = updates.automatic;
        settings.update_frequency = updates.check_frequency;
        settings.set_config_path(path);

        tracing::debug!(
            scope = %scope,
            path = %document.path().display(),
            automatic = ?updates.automatic,
            check_frequency = ?updates.check_frequency.map(|f| f.days()),
            "observed settings"
        );

        Ok(Observation {
            settings,
            document: Some(document),
        })
    }
}
