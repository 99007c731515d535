//! Error types for tstoy-fs

use std::fmt;
use std::path::PathBuf;

/// Result type for tstoy-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// The filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    Read,
    Write,
    CreateDir,
    Rename,
    Remove,
    ResolveLink,
}

impl fmt::Display for IoOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Read => "read",
            Self::Write => "write",
            Self::CreateDir => "create directory",
            Self::Rename => "rename",
            Self::Remove => "remove",
            Self::ResolveLink => "resolve link",
        };
        f.write_str(name)
    }
}

/// Errors that can occur in tstoy-fs operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: IoOperation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(operation: IoOperation, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// The path the failing operation was working on.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::LockFailed { path } => path,
        }
    }
}
