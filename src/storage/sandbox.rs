//! Path sandbox confining caller-supplied paths to the vault root.
//!
//! Resolution is lexical first: `.` and `..` segments are collapsed, any
//! leading `..` run left over is dropped, and root or drive prefixes are
//! ignored, so `../../etc/passwd` addresses `etc/passwd` inside the vault.
//! In strict mode an existing target is additionally canonicalized and must
//! stay under the canonical root, which catches symlinks leading out.

use std::path::{Component, Path, PathBuf};

use crate::storage::VaultError;

/// Resolves untrusted relative paths against a fixed vault root.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    root: PathBuf,
    canonical_root: PathBuf,
    strict: bool,
}

impl PathSandbox {
    /// Create a sandbox rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::InvalidRoot` if `root` is not an existing directory.
    pub fn new(root: PathBuf, strict: bool) -> Result<Self, VaultError> {
        if !root.is_dir() {
            return Err(VaultError::InvalidRoot(root.display().to_string()));
        }

        let canonical_root = root
            .canonicalize()
            .map_err(|e| VaultError::InvalidRoot(format!("{}: {e}", root.display())))?;

        Ok(Self {
            root,
            canonical_root,
            strict,
        })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    #[must_use]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Resolve a vault-relative path to an absolute path under the root.
    ///
    /// # Errors
    ///
    /// Returns `VaultError::PathEscape` in strict mode when the existing
    /// target canonicalizes to a location outside the vault root.
    pub fn resolve(&self, relative: &str) -> Result<PathBuf, VaultError> {
        let full_path = self.root.join(sanitize(relative));

        if self.strict {
            // Targets that do not exist are left for the caller's access check.
            if let Ok(canonical) = full_path.canonicalize()
                && !canonical.starts_with(&self.canonical_root)
            {
                tracing::warn!(requested = relative, target = %canonical.display(), "path escapes vault root");
                return Err(VaultError::PathEscape(relative.to_string()));
            }
        }

        Ok(full_path)
    }
}

/// Lexically normalize `relative` and strip anything that would address
/// ancestors of the root.
///
/// The result only ever contains normal components.
#[must_use]
pub fn sanitize(relative: &str) -> PathBuf {
    let mut parts: Vec<&std::ffi::OsStr> = Vec::new();
    let mut leading_parents = 0usize;

    for component in Path::new(relative).components() {
        match component {
            Component::Normal(part) => parts.push(part),
            Component::ParentDir => {
                if parts.pop().is_none() {
                    leading_parents += 1;
                }
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }

    if leading_parents > 0 {
        tracing::debug!(requested = relative, stripped = leading_parents, "stripped leading parent segments");
    }

    parts.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    mod sanitize_tests {
        use super::*;

        #[test]
        fn plain_path_unchanged() {
            assert_eq!(sanitize("notes/a.md"), PathBuf::from("notes/a.md"));
        }

        #[test]
        fn leading_parents_stripped() {
            assert_eq!(sanitize("../../etc/passwd"), PathBuf::from("etc/passwd"));
        }

        #[test]
        fn interior_parents_collapsed() {
            assert_eq!(sanitize("notes/../daily/./x.md"), PathBuf::from("daily/x.md"));
        }

        #[test]
        fn parents_past_start_are_stripped() {
            assert_eq!(sanitize("a/../../b"), PathBuf::from("b"));
        }

        #[test]
        fn absolute_path_joined_under_root() {
            assert_eq!(sanitize("/etc/passwd"), PathBuf::from("etc/passwd"));
        }

        #[test]
        fn empty_and_dot_address_root() {
            assert_eq!(sanitize(""), PathBuf::new());
            assert_eq!(sanitize("."), PathBuf::new());
            assert_eq!(sanitize(".."), PathBuf::new());
        }

        #[test]
        fn never_contains_parent_components() {
            for input in ["..", "../..", "../a/../..", "x/../../../y/z", "./../q"] {
                let out = sanitize(input);
                assert!(
                    out.components().all(|c| matches!(c, Component::Normal(_))),
                    "{input} sanitized to {}",
                    out.display()
                );
            }
        }
    }

    mod resolve_tests {
        use super::*;
        use tempfile::TempDir;

        #[test]
        fn new_rejects_missing_root() {
            let result = PathSandbox::new(PathBuf::from("/nonexistent/vault/root"), true);
            assert!(matches!(result, Err(VaultError::InvalidRoot(_))));
        }

        #[test]
        fn resolve_stays_under_root() {
            let temp = TempDir::new().unwrap();
            let sandbox = PathSandbox::new(temp.path().to_path_buf(), true).unwrap();

            for input in ["../../etc/passwd", "../x", "/abs/path", "a/../../../b"] {
                let resolved = sandbox.resolve(input).unwrap();
                assert!(resolved.starts_with(temp.path()), "{input} escaped");
            }
        }

        #[test]
        fn missing_target_passes_through() {
            let temp = TempDir::new().unwrap();
            let sandbox = PathSandbox::new(temp.path().to_path_buf(), true).unwrap();

            let resolved = sandbox.resolve("does/not/exist.md").unwrap();
            assert_eq!(resolved, temp.path().join("does/not/exist.md"));
        }

        #[cfg(unix)]
        #[test]
        fn strict_mode_rejects_symlink_escape() {
            let vault = TempDir::new().unwrap();
            let outside = TempDir::new().unwrap();
            std::fs::write(outside.path().join("secret.md"), "secret").unwrap();
            std::os::unix::fs::symlink(outside.path(), vault.path().join("link")).unwrap();

            let strict = PathSandbox::new(vault.path().to_path_buf(), true).unwrap();
            assert!(matches!(
                strict.resolve("link/secret.md"),
                Err(VaultError::PathEscape(_))
            ));

            let lenient = PathSandbox::new(vault.path().to_path_buf(), false).unwrap();
            assert!(lenient.resolve("link/secret.md").is_ok());
        }
    }
}
