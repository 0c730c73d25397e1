//! CLI interface for mdvault.
//!
//! Provides command-line argument parsing using clap.

use clap::{Parser, Subcommand};

/// Command-line interface for mdvault.
#[derive(Parser)]
#[command(name = "mdvault")]
#[command(author, version, about = "Read-only access to a Markdown vault", long_about = None)]
pub struct Cli {
    /// Vault root directory (overrides OBSIDIAN_VAULT_PATH and config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub vault: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print a note with its front matter parsed.
    Get {
        /// Vault-relative file path (e.g., "notes/weekly.md").
        path: String,

        /// Print the file exactly as stored.
        #[arg(long, conflicts_with = "json")]
        raw: bool,

        /// Print `{path, frontmatter, content}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the immediate children of a directory.
    List {
        /// Vault-relative directory path (default: vault root).
        #[arg(default_value = "")]
        path: String,

        /// Print `{path, items}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Search note contents for a case-insensitive substring.
    Search {
        /// The search query string.
        query: String,

        /// File extension to search (repeatable; default from config, ".md").
        #[arg(short, long = "ext", value_name = "EXT")]
        extensions: Vec<String>,

        /// Directory to start from (default: vault root).
        #[arg(short, long, default_value = "")]
        path: String,

        /// Stop after this many matching files.
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print `{query, results}` as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Start the MCP server for AI editor integration.
    #[cfg(feature = "mcp")]
    Serve,
}
