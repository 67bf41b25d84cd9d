//! CLI integration tests for fileshelf
//!
//! These run the real binary against a temporary database directory.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a command instance for the fileshelf binary, pointed at `dir`
fn shelf_cmd(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fileshelf"));
    cmd.env("FILESHELF_ROOT", dir.path().join("db"))
        .env("FILESHELF_CONFIG", dir.path().join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

// =============================================================================
// Record Tests
// =============================================================================

#[test]
fn test_put_then_get() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir)
        .args(["put", "users", "John", r#"{"Name":"John","Age":"23"}"#])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved users/John"));

    assert!(dir.path().join("db/users/John.json").is_file());

    shelf_cmd(&dir)
        .args(["--format", "json", "get", "users", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"Age":"23","Name":"John"}"#));
}

#[test]
fn test_put_reads_stdin() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir)
        .args(["put", "users", "Alice", "-"])
        .write_stdin(r#"{"Name":"Alice"}"#)
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("db/users/Alice.json")).unwrap();
    assert_eq!(text, "{\n\t\"Name\": \"Alice\"\n}\n");
}

#[test]
fn test_put_rejects_invalid_json() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir)
        .args(["put", "users", "John", "{not json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid JSON"));

    assert!(!dir.path().join("db/users").exists());
}

#[test]
fn test_get_missing_record_fails() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir)
        .args(["get", "users", "Jane"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unable to find file or directory"));
}

#[test]
fn test_list_collection() {
    let dir = TempDir::new().unwrap();

    for name in ["John", "Alice"] {
        shelf_cmd(&dir)
            .args(["put", "users", name, &format!(r#"{{"Name":"{}"}}"#, name)])
            .assert()
            .success();
    }

    shelf_cmd(&dir)
        .args(["list", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 record(s)"))
        .stdout(predicate::str::contains("\"Alice\""));
}

#[test]
fn test_list_missing_collection_fails() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir).args(["list", "ghosts"]).assert().failure();
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_record_keeps_siblings() {
    let dir = TempDir::new().unwrap();
    shelf_cmd(&dir).args(["put", "users", "John", "{}"]).assert().success();
    shelf_cmd(&dir).args(["put", "users", "Alice", "{}"]).assert().success();

    shelf_cmd(&dir)
        .args(["delete", "users", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted users/John"));

    assert!(!dir.path().join("db/users/John.json").exists());
    assert!(dir.path().join("db/users/Alice.json").exists());
}

#[test]
fn test_delete_collection() {
    let dir = TempDir::new().unwrap();
    shelf_cmd(&dir).args(["put", "users", "John", "{}"]).assert().success();

    shelf_cmd(&dir)
        .args(["delete", "users"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted collection users"));

    assert!(!dir.path().join("db/users").exists());
    shelf_cmd(&dir).args(["list", "users"]).assert().failure();
}

// =============================================================================
// Demo and Configuration Tests
// =============================================================================

#[test]
fn test_demo_seeds_users() {
    let dir = TempDir::new().unwrap();

    shelf_cmd(&dir)
        .arg("demo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 3 users"))
        .stdout(predicate::str::contains("Bangalore"));

    for name in ["John", "Alice", "Bob"] {
        assert!(dir.path().join(format!("db/users/{}.json", name)).is_file());
    }
}

#[test]
fn test_root_from_config_file() {
    let dir = TempDir::new().unwrap();
    let data = dir.path().join("from-config");
    fs::write(
        dir.path().join("config.toml"),
        format!("root = {:?}\n", data.display().to_string()),
    )
    .unwrap();

    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("fileshelf"));
    cmd.env_remove("FILESHELF_ROOT")
        .env("FILESHELF_CONFIG", dir.path().join("config.toml"))
        .args(["put", "users", "John", "{}"])
        .assert()
        .success();

    assert!(data.join("users/John.json").is_file());
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "log_level = \"chatty\"\n").unwrap();

    shelf_cmd(&dir)
        .args(["list", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}
