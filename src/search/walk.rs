//! Walking substring search.
//!
//! Visits the vault depth-first in directory enumeration order, skipping
//! hidden directories, and tests every file with a wanted extension for a
//! case-insensitive occurrence of the query. Each descent goes back through
//! the storage backend, so the sandbox checks every directory and file.

use std::path::Path;

use crate::search::{CancelToken, SearchBackend, SearchHit, SearchOptions};
use crate::storage::{StorageBackend, VaultError};

/// Characters of context kept on each side of a match.
pub const EXCERPT_CONTEXT: usize = 50;

const ELLIPSIS: &str = "...";

/// Search backend that reads every candidate file on each query.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkSearch;

impl WalkSearch {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SearchBackend for WalkSearch {
    fn search(
        &self,
        query: &str,
        storage: &dyn StorageBackend,
        options: &SearchOptions,
        cancel: &CancelToken,
    ) -> Result<Vec<SearchHit>, VaultError> {
        let needle = fold(query);
        let mut hits = Vec::new();
        let mut scanned = 0usize;

        if options.limit == Some(0) {
            return Ok(hits);
        }

        let mut stack = vec![storage.list_directory(&options.start)?.into_iter()];

        while let Some(entries) = stack.last_mut() {
            if cancel.is_cancelled() {
                tracing::debug!(query, hits = hits.len(), "search cancelled");
                return Err(VaultError::Cancelled);
            }

            let Some(entry) = entries.next() else {
                stack.pop();
                continue;
            };

            if entry.is_dir() {
                if entry.name.starts_with('.') {
                    continue;
                }
                match storage.list_directory(&entry.path) {
                    Ok(children) => stack.push(children.into_iter()),
                    Err(e) => tracing::warn!(path = %entry.path, error = %e, "skipping directory"),
                }
                continue;
            }

            if !has_wanted_extension(&entry.name, options) {
                continue;
            }

            let content = match read_candidate(storage, &entry.path) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping file");
                    continue;
                }
            };
            scanned += 1;

            if let Some(excerpt) = match_excerpt(&content, &needle) {
                hits.push(SearchHit {
                    excerpt,
                    path: entry.path,
                    name: entry.name,
                });

                if options.limit.is_some_and(|limit| hits.len() >= limit) {
                    break;
                }
            }
        }

        tracing::debug!(query, scanned, hits = hits.len(), "search finished");
        Ok(hits)
    }
}

/// Read a file found by the walk; any failure becomes a `ReadFailure`.
fn read_candidate(storage: &dyn StorageBackend, path: &str) -> Result<String, VaultError> {
    storage
        .read_document(path)
        .map_err(|e| VaultError::ReadFailure(format!("{path}: {e}")))
}

fn has_wanted_extension(name: &str, options: &SearchOptions) -> bool {
    Path::new(name)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .is_some_and(|ext| options.matches_extension(&ext))
}

/// Lowercase char by char, keeping a char as-is when its lowercase form
/// expands to several chars, so offsets line up with the original text.
fn fold(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

fn find_folded(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Preview around the first case-insensitive match of the folded `needle`,
/// or `None` when `content` does not contain it.
fn match_excerpt(content: &str, needle: &[char]) -> Option<String> {
    let at = find_folded(&fold(content), needle)?;
    let chars: Vec<char> = content.chars().collect();
    Some(excerpt_window(&chars, at, needle.len()))
}

fn excerpt_window(chars: &[char], at: usize, len: usize) -> String {
    let start = at.saturating_sub(EXCERPT_CONTEXT);
    let end = (at + len + EXCERPT_CONTEXT).min(chars.len());

    let mut out = String::new();
    if start > 0 {
        out.push_str(ELLIPSIS);
    }
    out.extend(&chars[start..end]);
    if end < chars.len() {
        out.push_str(ELLIPSIS);
    }
    out
}
