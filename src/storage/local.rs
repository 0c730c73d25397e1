//! Local filesystem storage backend.

use std::fs;
use std::path::{Path, PathBuf};

use crate::corpus::{DirectoryEntry, EntryKind};
use crate::storage::sandbox::PathSandbox;
use crate::storage::{StorageBackend, VaultError};

/// Storage backend for read-only local filesystem access.
///
/// Every path goes through the [`PathSandbox`] before it touches the disk.
#[derive(Debug, Clone)]
pub struct LocalStorageBackend {
    sandbox: PathSandbox,
}

impl LocalStorageBackend {
    /// Create a new local storage backend rooted at the given path.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidRoot` if `root` is not an existing directory.
    pub fn new(root: PathBuf, strict: bool) -> Result<Self, VaultError> {
        Ok(Self {
            sandbox: PathSandbox::new(root, strict)?,
        })
    }

    #[must_use]
    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }
}

impl StorageBackend for LocalStorageBackend {
    fn read_document(&self, path: &str) -> Result<String, VaultError> {
        let full_path = self.sandbox.resolve(path)?;

        let is_file = fs::metadata(&full_path).is_ok_and(|m| m.is_file());
        if !is_file {
            tracing::warn!(path, "not a readable file");
            return Err(VaultError::file_not_found(path));
        }

        fs::read_to_string(&full_path).map_err(|e| {
            tracing::warn!(path, error = %e, "failed to read file");
            VaultError::file_not_found(path)
        })
    }

    fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, VaultError> {
        let full_path = self.sandbox.resolve(path)?;

        let read_dir = fs::read_dir(&full_path).map_err(|e| {
            tracing::warn!(path, error = %e, "failed to read directory");
            VaultError::dir_not_found(path)
        })?;

        let mut entries = Vec::new();
        for item in read_dir {
            let item = item.map_err(|e| {
                tracing::warn!(path, error = %e, "failed to enumerate directory");
                VaultError::dir_not_found(path)
            })?;

            // file_type() does not follow symlinks; only real directories count.
            let kind = match item.file_type() {
                Ok(t) if t.is_dir() => EntryKind::Directory,
                _ => EntryKind::File,
            };

            let name = item.file_name().to_string_lossy().into_owned();
            let child_path = Path::new(path).join(&name).to_string_lossy().into_owned();

            entries.push(DirectoryEntry {
                name,
                kind,
                path: child_path,
            });
        }

        Ok(entries)
    }

    fn root(&self) -> &Path {
        self.sandbox.root()
    }
}
