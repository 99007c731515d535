//! Whole-file I/O with atomic replacement

use std::fs::{self, File, OpenOptions, Permissions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use fs2::FileExt;

use crate::{Error, IoOperation, Result};

/// Read a file as UTF-8 text.
///
/// Returns `Ok(None)` when the file does not exist. Every other failure,
/// including permission problems and invalid UTF-8, is an error.
pub fn read_text(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(Error::io(IoOperation::Read, path, e)),
    }
}

/// Write content atomically to a file with locking.
///
/// A symlinked `path` is written through: the file it points at is
/// replaced and the link is kept. Missing parent directories are created.
/// The content goes to a temp sibling which is renamed over the target, so
/// readers see either the old or the new content, never a mix. An existing
/// target keeps its permissions.
///
/// Writers of the same target are serialized by an exclusive advisory lock
/// on a `.{name}.lock` sibling, held from the temp write through the rename.
/// The lock file is left in place.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let target = resolve_target(path)?;
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(IoOperation::CreateDir, parent, e))?;
    }

    // Released when dropped.
    let _lock = acquire_lock(&target)?;
    let permissions = fs::metadata(&target).ok().map(|m| m.permissions());

    let temp_path = temp_path_for(&target);
    let result = write_temp(&temp_path, content, permissions).and_then(|()| {
        fs::rename(&temp_path, &target).map_err(|e| Error::io(IoOperation::Rename, &target, e))
    });

    if result.is_err() {
        // Best effort; the target was never touched.
        let _ = fs::remove_file(&temp_path);
    }
    result
}

/// Write text content to a file atomically.
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    write_atomic(path, content.as_bytes())
}

/// Remove a file.
///
/// Returns `Ok(false)` when there was nothing to remove.
pub fn remove(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::io(IoOperation::Remove, path, e)),
    }
}

static TEMP_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// The file a write to `path` lands in: `path` itself, or the file a
/// symlink at `path` points to. A dangling link resolves one hop, relative
/// to the link's directory.
fn resolve_target(path: &Path) -> Result<PathBuf> {
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let link = fs::read_link(path)
                .map_err(|e| Error::io(IoOperation::ResolveLink, path, e))?;
            Ok(match path.parent() {
                Some(dir) => dir.join(link),
                None => link,
            })
        }
        Err(e) => Err(Error::io(IoOperation::ResolveLink, path, e)),
    }
}

/// Temp file path in the same directory as `path` so the rename stays on
/// one filesystem. Unique per process and per call.
fn temp_path_for(path: &Path) -> PathBuf {
    let temp_name = format!(
        ".{}.{}.{}.tmp",
        file_name(path),
        std::process::id(),
        TEMP_SEQUENCE.fetch_add(1, Ordering::Relaxed)
    );
    path.with_file_name(temp_name)
}

/// Stable lock file path next to `path`.
fn lock_path_for(path: &Path) -> PathBuf {
    path.with_file_name(format!(".{}.lock", file_name(path)))
}

fn file_name(path: &Path) -> std::borrow::Cow<'_, str> {
    path.file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_default()
}

fn acquire_lock(target: &Path) -> Result<File> {
    let lock_path = lock_path_for(target);
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .map_err(|e| Error::io(IoOperation::Write, &lock_path, e))?;

    lock_file
        .lock_exclusive()
        .map_err(|_| Error::LockFailed { path: target.to_path_buf() })?;
    tracing::trace!(path = %lock_path.display(), "acquired write lock");
    Ok(lock_file)
}

fn write_temp(temp_path: &Path, content: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(temp_path)
        .map_err(|e| Error::io(IoOperation::Write, temp_path, e))?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(IoOperation::Write, temp_path, e))?;
    temp_file
        .sync_all()
        .map_err(|e| Error::io(IoOperation::Write, temp_path, e))?;

    if let Some(permissions) = permissions {
        fs::set_permissions(temp_path, permissions)
            .map_err(|e| Error::io(IoOperation::Write, temp_path, e))?;
    }

    tracing::trace!(path = %temp_path.display(), bytes = content.len(), "wrote temp file");
    Ok(())
}
