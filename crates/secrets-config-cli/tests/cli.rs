//! End-to-end tests for the secrets-config binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn secrets_config() -> Command {
    let mut cmd = Command::cargo_bin("secrets-config").unwrap();
    cmd.env_remove("SECRETS_DIR")
        .env_remove("SECRETS_OPTIONAL")
        .env_remove("SECRETS_IGNORE_PREFIX")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_list_masks_values() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("database__password"), "hunter2").unwrap();
    fs::write(temp.path().join("ignore.readme"), "notes").unwrap();

    secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("database:password"))
        .stdout(predicate::str::contains("hunter2").not())
        .stdout(predicate::str::contains("ignore.readme").not());
}

#[test]
fn test_list_json_with_values() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("api__token"), "abc").unwrap();

    let output = secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .args(["list", "--format", "json", "--show-values"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["count"], 1);
    assert_eq!(parsed["entries"][0]["key"], "api:token");
    assert_eq!(parsed["entries"][0]["value"], "abc");
}

#[test]
fn test_get_value() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("Smtp__Password"), "pw").unwrap();

    secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .args(["get", "smtp:password"])
        .assert()
        .success()
        .stdout("pw\n");
}

#[test]
fn test_get_missing_key() {
    let temp = tempfile::tempdir().unwrap();

    secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .args(["get", "nope"])
        .assert()
        .code(1)
        .stdout("");
}

#[test]
fn test_missing_directory() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing");

    secrets_config()
        .arg("--dir")
        .arg(&missing)
        .arg("list")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("not found"));

    secrets_config()
        .arg("--dir")
        .arg(&missing)
        .args(["--optional", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets loaded"));
}

#[cfg(unix)]
#[test]
fn test_duplicate_keys() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("a__b"), "1").unwrap();
    fs::write(temp.path().join("a:b"), "2").unwrap();

    secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .arg("list")
        .assert()
        .code(5)
        .stderr(predicate::str::contains("Duplicate configuration key"));
}

#[test]
fn test_directory_from_environment() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("ignore.kept"), "yes").unwrap();

    secrets_config()
        .env("SECRETS_DIR", temp.path())
        .args(["list", "--no-ignore-prefix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignore.kept"));
}

#[test]
fn test_optional_from_environment_accepts_numeric_flags() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("missing");

    secrets_config()
        .env("SECRETS_OPTIONAL", "1")
        .arg("--dir")
        .arg(&missing)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No secrets loaded"));

    secrets_config()
        .env("SECRETS_OPTIONAL", "0")
        .arg("--dir")
        .arg(&missing)
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_binary_secret_does_not_hide_other_keys() {
    let temp = tempfile::tempdir().unwrap();
    fs::write(temp.path().join("db__password"), "hunter2").unwrap();
    fs::write(temp.path().join("keystore"), [0x30, 0x82, 0xff, 0xfe]).unwrap();

    secrets_config()
        .arg("--dir")
        .arg(temp.path())
        .args(["get", "db:password"])
        .assert()
        .success()
        .stdout("hunter2\n");
}
