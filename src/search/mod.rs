//! Search backend trait and types.

pub mod walk;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::storage::{StorageBackend, VaultError};

/// Extension searched when none are given.
pub const DEFAULT_EXTENSION: &str = ".md";

/// Options for scoping and limiting a search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Lowercase extensions with a leading dot (e.g. `.md`).
    pub extensions: Vec<String>,
    /// Vault-relative directory the walk starts from; empty means the root.
    pub start: String,
    pub limit: Option<usize>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            start: String::new(),
            limit: None,
        }
    }
}

impl SearchOptions {
    /// Build options from user-supplied extensions, accepting `md`, `.md`
    /// or `.MD` alike. Falls back to the default when none remain.
    #[must_use]
    pub fn with_extensions<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let extensions: Vec<String> = extensions
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .filter(|e| e.len() > 1)
            .collect();

        if extensions.is_empty() {
            return Self::default();
        }

        Self {
            extensions,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn matches_extension(&self, ext: &str) -> bool {
        self.extensions.iter().any(|e| e == ext)
    }
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.trim().to_lowercase();
    if ext.starts_with('.') {
        ext
    } else {
        format!(".{ext}")
    }
}

/// A single matching file with a preview of the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub path: String,
    pub name: String,
    pub excerpt: String,
}

/// Cooperative cancellation flag shared between a search and its caller.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Returns a guard that cancels this token when dropped.
    #[must_use]
    pub fn drop_guard(&self) -> CancelOnDrop {
        CancelOnDrop {
            token: self.clone(),
        }
    }
}

/// Cancels its token on drop. See [`CancelToken::drop_guard`].
#[derive(Debug)]
pub struct CancelOnDrop {
    token: CancelToken,
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Trait for search backends.
pub trait SearchBackend: Send + Sync {
    /// Search the vault for files matching the query.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the start directory cannot be
    /// listed, or `VaultError::Cancelled` if `cancel` fires mid-walk.
    fn search(
        &self,
        query: &str,
        storage: &dyn StorageBackend,
        options: &SearchOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<SearchHit>, VaultError>;
}
