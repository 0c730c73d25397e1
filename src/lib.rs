//! mdvault - Read-only access to a Markdown vault.
//!
//! This library serves a directory tree of Markdown notes through three
//! operations: fetching a note (with its front matter parsed), listing a
//! directory, and case-insensitive full-text search with excerpts. Every
//! caller-supplied path is resolved through a sandbox that keeps access
//! inside the configured vault root.
//!
//! # Modules
//!
//! - [`commands`] - The `Vault` facade shared by CLI and MCP server
//! - [`corpus`] - Note types and front-matter parsing
//! - [`search`] - Search backend trait and the walking substring search
//! - [`storage`] - Storage backend trait, path sandbox, local filesystem
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cli;
pub mod commands;
pub mod config;
pub mod corpus;
pub mod search;
pub mod storage;

#[cfg(feature = "mcp")]
pub mod mcp;
