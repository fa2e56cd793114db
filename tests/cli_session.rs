//! End-to-end tests for the `session` command group

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

mod common;

fn datadash(storage: &TempDir, config: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("datadash").unwrap();
    cmd.env_remove("NEXT_PUBLIC_API_BASE_URL")
        .arg("--config")
        .arg(config)
        .arg("--storage-path")
        .arg(storage.path().join("sessions.db"));
    cmd
}

#[test]
fn test_session_set_show_clear() {
    let storage = TempDir::new().unwrap();
    let (_config_dir, config_path) = common::temp_config_file("api:\n  base_url: /api\n");

    datadash(&storage, &config_path)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session"));

    datadash(&storage, &config_path)
        .args(["session", "set", "sess-42"])
        .assert()
        .success();

    datadash(&storage, &config_path)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sess-42"));

    datadash(&storage, &config_path)
        .args(["session", "clear"])
        .assert()
        .success();

    datadash(&storage, &config_path)
        .args(["session", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let storage = TempDir::new().unwrap();
    let (_config_dir, config_path) =
        common::temp_config_file("api:\n  base_url: /api\n  timeout_seconds: 0\n");

    datadash(&storage, &config_path)
        .args(["session", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("timeout_seconds"));
}

#[test]
fn test_unreachable_backend_exits_nonzero() {
    let storage = TempDir::new().unwrap();
    let (_config_dir, config_path) =
        common::temp_config_file("api:\n  base_url: http://127.0.0.1:9\n  timeout_seconds: 2\n");

    datadash(&storage, &config_path)
        .args(["datasets", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}
