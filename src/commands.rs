//! Command implementations shared by CLI and MCP server.
//!
//! [`Vault`] is the single entry point: it owns the sandboxed storage
//! backend and the search backend, and is built once from [`Config`].

use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::corpus::{DirectoryEntry, Note, parse_front_matter};
use crate::search::walk::WalkSearch;
use crate::search::{CancelToken, SearchBackend, SearchHit, SearchOptions};
use crate::storage::local::LocalStorageBackend;
use crate::storage::{StorageBackend, VaultError};

/// Read-only facade over a vault.
#[derive(Clone)]
pub struct Vault {
    storage: Arc<dyn StorageBackend>,
    search: Arc<dyn SearchBackend>,
    extensions: Vec<String>,
}

impl Vault {
    /// Open the vault described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the root cannot be determined or is not a directory.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let root = config.vault_root()?;
        let storage = LocalStorageBackend::new(root, config.vault.strict)?;

        tracing::debug!(
            root = %storage.root().display(),
            strict = storage.sandbox().is_strict(),
            "opened vault"
        );

        Ok(Self {
            storage: Arc::new(storage),
            search: Arc::new(WalkSearch::new()),
            extensions: SearchOptions::with_extensions(&config.search.extensions).extensions,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.storage.root()
    }

    /// Search options seeded with the configured extensions.
    #[must_use]
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            extensions: self.extensions.clone(),
            ..SearchOptions::default()
        }
    }

    /// Read a file's raw content.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the file is missing or unreadable.
    pub fn read_file(&self, path: &str) -> Result<String, VaultError> {
        self.storage.read_document(path)
    }

    /// Read a file and split off its front matter.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the file is missing or unreadable.
    pub fn get(&self, path: &str) -> Result<Note, VaultError> {
        let content = self.read_file(path)?;
        Ok(Note::new(path, parse_front_matter(&content)))
    }

    /// List a directory's immediate children in enumeration order.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::NotFound` if the directory is missing or unreadable.
    pub fn list(&self, path: &str) -> Result<Vec<DirectoryEntry>, VaultError> {
        self.storage.list_directory(path)
    }

    /// Search the vault for `query`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::EmptyQuery` for an empty query, or
    /// `VaultError::NotFound` if the start directory cannot be listed.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Result<Vec<SearchHit>, VaultError> {
        self.search_with_cancel(query, options, &CancelToken::new())
    }

    /// Like [`Vault::search`], aborting with `VaultError::Cancelled` once
    /// `cancel` fires.
    ///
    /// # Errors
    ///
    /// See [`Vault::search`]; additionally `VaultError::Cancelled`.
    pub fn search_with_cancel(
        &self,
        query: &str,
        options: &SearchOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<SearchHit>, VaultError> {
        if query.is_empty() {
            return Err(VaultError::EmptyQuery);
        }

        self.search.search(query, self.storage.as_ref(), options, cancel)
    }
}
