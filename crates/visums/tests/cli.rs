use std::path::Path;

use assert_cmd::Command; // Bring Command into scope
use predicates::prelude::*; // Bring predicate traits into scope
use tempfile::{TempDir, tempdir};

// Temp dir with a `.env` and optional `.env.local`
fn env_dir(base: &str, local: Option<&str>) -> TempDir {
    let dir = tempdir().expect("Failed to create temp directory");
    std::fs::write(dir.path().join(".env"), base).expect("Failed to write .env");
    if let Some(content) = local {
        std::fs::write(dir.path().join(".env.local"), content).expect("Failed to write .env.local");
    }
    dir
}

fn visums(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("visums").expect("binary should build");
    cmd.current_dir(dir);
    cmd
}

#[test]
fn test_get_prints_value_with_override() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("A=1\nB=2\n", Some("B=3\n"));

    visums(dir.path())
        .args(["get", "B"])
        .assert()
        .success()
        .stdout("3\n");

    Ok(())
}

#[test]
fn test_get_unset_key_fails_quietly() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("A=1\n", None);

    visums(dir.path())
        .args(["get", "MISSING"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("'MISSING' is not set"));

    Ok(())
}

#[test]
fn test_missing_base_file_is_reported() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    visums(dir.path())
        .args(["get", "A"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(".env"));

    Ok(())
}

#[test]
fn test_explicit_file_paths() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    std::fs::write(dir.path().join("base.env"), "NAME=\"from base\"\n")?;

    visums(dir.path())
        .args(["--env", "base.env", "--local", "none.env", "get", "NAME"])
        .assert()
        .success()
        .stdout("from base\n");

    Ok(())
}

#[test]
fn test_dump_json() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("A=1\n# skipped\nB='two'\n", None);

    visums(dir.path())
        .arg("dump")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"A\": \"1\""))
        .stdout(predicate::str::contains("\"B\": \"two\""))
        .stdout(predicate::str::contains("skipped").not());

    Ok(())
}

#[test]
fn test_dump_unknown_format_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("A=1\n", None);

    visums(dir.path())
        .args(["dump", "--format", "ini"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported configuration format: ini"));

    Ok(())
}

#[test]
fn test_query_prints_rows_as_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("DSN=sqlite://:memory:\n", None);

    visums(dir.path())
        .args(["query", "SELECT ?1 AS n, ?2 AS s", "5", "five"])
        .assert()
        .success()
        .stdout("{\"n\":5,\"s\":\"five\"}\n");

    Ok(())
}

#[test]
fn test_query_with_incomplete_settings_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("dbtype=sqlite\n", None);

    visums(dir.path())
        .args(["query", "SELECT 1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incomplete Db configuration"));

    Ok(())
}

#[test]
fn test_save_is_not_implemented() -> Result<(), Box<dyn std::error::Error>> {
    let dir = env_dir("A=1\n", None);

    visums(dir.path())
        .args(["save", "out.env"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not implemented"));

    assert!(!dir.path().join("out.env").exists());
    Ok(())
}
