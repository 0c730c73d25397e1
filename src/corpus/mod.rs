//! Vault document types.

pub mod frontmatter;

use std::collections::BTreeMap;

use serde::Serialize;

pub use frontmatter::parse_front_matter;

/// Kind of a directory child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    /// Capitalized label used in user-facing messages.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::File => "File",
            Self::Directory => "Directory",
        }
    }
}

/// One immediate child of a listed directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// The listed directory joined with `name`, as the caller wrote it.
    pub path: String,
}

impl DirectoryEntry {
    #[must_use]
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// A document split into its front matter and body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    pub frontmatter: BTreeMap<String, String>,
    #[serde(rename = "content")]
    pub body: String,
}

/// A fetched note as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Note {
    /// Path exactly as requested.
    pub path: String,
    pub frontmatter: BTreeMap<String, String>,
    pub content: String,
}

impl Note {
    #[must_use]
    pub fn new(path: &str, parsed: ParsedDocument) -> Self {
        Self {
            path: path.to_string(),
            frontmatter: parsed.frontmatter,
            content: parsed.body,
        }
    }
}
