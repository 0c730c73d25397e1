//! End-to-end CLI tests for mdvault.
//!
//! These tests exercise the full CLI binary with isolated test environments.
//! Each test creates its own temporary vault and config to ensure isolation.

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// =============================================================================
// Test Environment Helper
// =============================================================================

/// Isolated test environment with its own vault and config.
struct TestEnv {
    _temp_dir: TempDir,
    vault_path: PathBuf,
    config_path: PathBuf,
}

impl TestEnv {
    /// Create a new empty test environment.
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        let vault_path = root.join("vault");
        fs::create_dir_all(&vault_path).expect("Failed to create vault dir");

        // Config with defaults only; the vault comes from the environment.
        let config_path = root.join("config.toml");
        fs::write(&config_path, "[vault]\nstrict = true\n").expect("Failed to write config");

        Self {
            _temp_dir: temp_dir,
            vault_path,
            config_path,
        }
    }

    /// Create a test environment with sample notes.
    fn with_notes() -> Self {
        let env = Self::new();

        fs::create_dir_all(env.vault_path.join("notes")).expect("Failed to create notes dir");
        fs::create_dir_all(env.vault_path.join(".trash")).expect("Failed to create trash dir");
        fs::create_dir_all(env.vault_path.join("empty")).expect("Failed to create empty dir");

        fs::write(
            env.vault_path.join("notes/a.md"),
            "---\ntitle: Cake\ntags: [food, errands]\n---\nvisit the cup cake shop today\n",
        )
        .expect("Failed to write note");

        fs::write(
            env.vault_path.join("notes/b.txt"),
            "visit the cup cake shop today",
        )
        .expect("Failed to write text file");

        fs::write(env.vault_path.join(".trash/old.md"), "old shop note")
            .expect("Failed to write hidden note");

        env
    }

    /// Get a Command configured for this test environment.
    fn command(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("mdvault");
        cmd.env("MDVAULT_CONFIG", &self.config_path);
        cmd.env("OBSIDIAN_VAULT_PATH", &self.vault_path);
        cmd
    }
}

// =============================================================================
// 1. Help / No Command Tests
// =============================================================================

#[test]
fn tc_1_1_no_subcommand_shows_help() {
    let env = TestEnv::new();

    env.command()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("search"));
}

#[test]
fn tc_1_2_help_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Read-only access to a Markdown vault"));
}

#[test]
fn tc_1_3_version_flag() {
    let env = TestEnv::new();

    env.command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mdvault"));
}

// =============================================================================
// 2. Get Command Tests
// =============================================================================

#[test]
fn tc_2_1_get_prints_front_matter_and_body() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["get", "notes/a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title: Cake"))
        .stdout(predicate::str::contains("tags: [food, errands]"))
        .stdout(predicate::str::contains("visit the cup cake shop today"))
        .stdout(predicate::str::contains("---").not());
}

#[test]
fn tc_2_2_get_raw() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["get", "notes/a.md", "--raw"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("---\ntitle: Cake\n"));
}

#[test]
fn tc_2_3_get_json() {
    let env = TestEnv::with_notes();

    let output = env
        .command()
        .args(["get", "notes/a.md", "--json"])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    assert_eq!(json["path"], "notes/a.md");
    assert_eq!(json["frontmatter"]["title"], "Cake");
    assert_eq!(json["content"], "visit the cup cake shop today\n");
}

#[test]
fn tc_2_4_get_missing_file_fails() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["get", "notes/missing.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found or cannot be read"));
}

#[test]
fn tc_2_5_get_traversal_stays_in_vault() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["get", "../../notes/a.md"])
        .assert()
        .success()
        .stdout(predicate::str::contains("title: Cake"));
}

#[test]
fn tc_2_6_get_directory_fails() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["get", "notes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found or cannot be read"));
}

// =============================================================================
// 3. List Command Tests
// =============================================================================

#[test]
fn tc_3_1_list_root() {
    let env = TestEnv::with_notes();

    env.command()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes/"))
        .stdout(predicate::str::contains(".trash/"))
        .stdout(predicate::str::contains("empty/"));
}

#[test]
fn tc_3_2_list_empty_directory() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["list", "empty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries in 'empty'"));
}

#[test]
fn tc_3_3_list_missing_directory_fails() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["list", "missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Directory not found or cannot be read",
        ));
}

#[test]
fn tc_3_4_list_json() {
    let env = TestEnv::with_notes();

    let output = env
        .command()
        .args(["list", "notes", "--json"])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    assert_eq!(json["path"], "notes");
    let items = json["items"].as_array().expect("items array");
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i["type"] == "file"));
}

// =============================================================================
// 4. Search Command Tests
// =============================================================================

#[test]
fn tc_4_1_search_with_matches() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["search", "SHOP"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a.md"))
        .stdout(predicate::str::contains("b.txt").not())
        .stdout(predicate::str::contains("old.md").not())
        .stdout(predicate::str::contains("1 result(s) found"));
}

#[test]
fn tc_4_2_search_with_no_matches() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["search", "xyznonexistent123"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "No matches found for 'xyznonexistent123'",
        ));
}

#[test]
fn tc_4_3_search_empty_query_fails() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["search", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search query is required"));
}

#[test]
fn tc_4_4_search_other_extension() {
    let env = TestEnv::with_notes();

    env.command()
        .args(["search", "shop", "--ext", "txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("1 result(s) found"));
}

#[test]
fn tc_4_5_search_json() {
    let env = TestEnv::with_notes();

    let output = env
        .command()
        .args(["search", "cake", "--json"])
        .output()
        .expect("Failed to run");
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Invalid JSON");
    assert_eq!(json["query"], "cake");
    let results = json["results"].as_array().expect("results array");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "a.md");
    // Front matter is part of the searched text; the first match is the title.
    assert!(
        results[0]["excerpt"]
            .as_str()
            .is_some_and(|e| e.starts_with("---\ntitle: Cake") && e.ends_with("..."))
    );
}

#[test]
fn tc_4_6_search_limit() {
    let env = TestEnv::with_notes();
    fs::write(env.vault_path.join("c.md"), "another shop").unwrap();

    env.command()
        .args(["search", "shop", "--limit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 result(s) found"));
}

// =============================================================================
// 5. Configuration Tests
// =============================================================================

#[test]
fn tc_5_1_vault_flag_overrides_environment() {
    let env = TestEnv::with_notes();
    let other = TempDir::new().expect("Failed to create temp dir");
    fs::write(other.path().join("elsewhere.md"), "shop elsewhere").unwrap();

    env.command()
        .arg("--vault")
        .arg(other.path())
        .args(["search", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere.md"))
        .stdout(predicate::str::contains("a.md").not());
}

#[test]
fn tc_5_2_config_file_root_and_extensions() {
    let env = TestEnv::with_notes();
    fs::write(
        &env.config_path,
        format!(
            "[vault]\nroot = \"{}\"\n\n[search]\nextensions = [\".txt\"]\n",
            env.vault_path.display().to_string().replace('\\', "\\\\")
        ),
    )
    .unwrap();

    cargo_bin_cmd!("mdvault")
        .env("MDVAULT_CONFIG", &env.config_path)
        .env_remove("OBSIDIAN_VAULT_PATH")
        .args(["search", "shop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("b.txt"))
        .stdout(predicate::str::contains("a.md").not());
}

#[test]
fn tc_5_3_missing_vault_root_fails() {
    let env = TestEnv::new();

    env.command()
        .args(["--vault", "/nonexistent/mdvault/root", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Vault root is not a directory"));
}

#[test]
fn tc_5_4_invalid_config_fails() {
    let env = TestEnv::new();
    fs::write(&env.config_path, "[vault\nroot =").unwrap();

    env.command()
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}
