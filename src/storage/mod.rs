//! Storage backend trait and implementations.
//!
//! This module provides an abstraction for read-only vault access, allowing
//! the facade and search engine to work against the local filesystem or any
//! other backend that can fetch files and enumerate directories.

pub mod local;
pub mod sandbox;

use crate::corpus::{DirectoryEntry, EntryKind};

/// Errors that can occur during vault operations.
#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("Path escapes vault root: {0}")]
    PathEscape(String),

    /// Missing, unreadable and wrong-kind paths all collapse into this variant.
    #[error("{} not found or cannot be read", .kind.title())]
    NotFound { kind: EntryKind, path: String },

    #[error("Failed to read: {0}")]
    ReadFailure(String),

    #[error("Search query is required")]
    EmptyQuery,

    #[error("Search cancelled")]
    Cancelled,

    #[error("Vault root is not a directory: {0}")]
    InvalidRoot(String),
}

impl VaultError {
    pub(crate) fn file_not_found(path: &str) -> Self {
        Self::NotFound {
            kind: EntryKind::File,
            path: path.to_string(),
        }
    }

    pub(crate) fn dir_not_found(path: &str) -> Self {
        Self::NotFound {
            kind: EntryKind::Directory,
            path: path.to_string(),
        }
    }
}

/// Trait for read-only storage backends (local filesystem, in-memory, etc.).
///
/// Paths are vault-relative strings exactly as supplied by callers; backends
/// are responsible for sanitizing them.
pub trait StorageBackend: Send + Sync {
    /// Read a file's entire content as text.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the file is missing, is not a
    /// regular file, or cannot be read.
    fn read_document(&self, path: &str) -> Result<String, VaultError>;

    /// List the immediate children of a directory, in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the directory is missing, is not a
    /// directory, or cannot be read.
    fn list_directory(&self, path: &str) -> Result<Vec<DirectoryEntry>, VaultError>;

    /// Get the root path/identifier for this storage backend.
    fn root(&self) -> &std::path::Path;
}
