//! Configuration loading for mdvault.
//!
//! The vault root is resolved once at startup, in order of precedence:
//! the `--vault` flag, the `OBSIDIAN_VAULT_PATH` environment variable,
//! `vault.root` in config.toml, and finally the working directory.

use std::path::{Path, PathBuf};

use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

use crate::search::DEFAULT_EXTENSION;

/// Environment variable naming the vault root.
pub const VAULT_PATH_ENV: &str = "OBSIDIAN_VAULT_PATH";

/// Environment variable overriding the config file location.
pub const CONFIG_PATH_ENV: &str = "MDVAULT_CONFIG";

/// Top-level configuration loaded from config.toml.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vault: VaultConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Where the vault lives and how strictly paths are checked.
#[derive(Debug, Deserialize)]
pub struct VaultConfig {
    /// Vault root; `~` is expanded. Defaults to the working directory.
    #[serde(default)]
    pub root: Option<String>,
    /// Reject paths whose real location (after symlinks) leaves the root.
    #[serde(default = "default_strict")]
    pub strict: bool,
}

/// Defaults for the search operation.
#[derive(Debug, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_strict() -> bool {
    true
}

fn default_extensions() -> Vec<String> {
    vec![DEFAULT_EXTENSION.to_string()]
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            root: None,
            strict: default_strict(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

impl Config {
    /// Load config from `$MDVAULT_CONFIG` or ~/.config/mdvault/config.toml,
    /// or return defaults, then apply `$OBSIDIAN_VAULT_PATH`.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let config_path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(Self::config_path);

        let config = match config_path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Config::default(),
        };

        Ok(config.with_root_override(std::env::var(VAULT_PATH_ENV).ok()))
    }

    /// Parse a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read config {}: {e}", path.display()))?;
        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Invalid config {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "mdvault").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Replace the configured root when `root` is set and non-empty.
    #[must_use]
    pub fn with_root_override(mut self, root: Option<String>) -> Self {
        if let Some(root) = root.filter(|r| !r.is_empty()) {
            self.vault.root = Some(root);
        }
        self
    }

    /// The absolute vault root: the configured path with `~` expanded and
    /// relative paths taken from the working directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn vault_root(&self) -> anyhow::Result<PathBuf> {
        let cwd = std::env::current_dir()?;

        Ok(match &self.vault.root {
            Some(root) => {
                let path = expand_tilde(root);
                if path.is_absolute() {
                    path
                } else {
                    cwd.join(path)
                }
            }
            None => cwd,
        })
    }
}

/// Expand ~ to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/")
        && let Some(base_dirs) = BaseDirs::new()
    {
        return base_dirs.home_dir().join(rest);
    }
    PathBuf::from(path)
}
