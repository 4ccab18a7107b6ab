//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help_lists_commands() {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("migrate"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--database-url"));
}

#[test]
fn test_migrate_help() {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("migrate").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Maximum pooled connections"));
}

#[test]
fn test_serve_rejects_bad_bind_address() {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("serve").arg("--bind").arg("not-an-address");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.arg("frobnicate");

    cmd.assert().failure();
}

#[test]
fn test_malformed_dotenv_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(".env"), "BAD LINE WITH' QUOTE\n").unwrap();

    let mut cmd = Command::cargo_bin("clientbook").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("RUST_LOG")
        .env_remove("DATABASE_URL")
        .args([
            "migrate",
            "--database-url",
            "postgres://postgres@127.0.0.1:1/clientbook",
            "--db-timeout",
            "1",
        ]);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("Failed to parse .env"));
}
