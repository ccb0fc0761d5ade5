use assert_cmd::Command;
use daybook::gate::hash_password;
use predicates::prelude::*;
use serial_test::serial;
use std::path::Path;
use tempfile::tempdir;

const PASSWORD: &str = "open sesame";

fn set_up_command(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("daybook").unwrap();
    cmd.env_clear()
        .env("HOME", dir)
        .env("DAYBOOK_DB", dir.join("diary.db"))
        .env("DAYBOOK_EDITOR", "true");
    if let Ok(path) = std::env::var("PATH") {
        cmd.env("PATH", path);
    }
    cmd
}

#[test]
#[serial]
fn test_correct_password_unlocks() {
    let dir = tempdir().unwrap();
    let hash = hash_password(PASSWORD).unwrap();

    set_up_command(dir.path())
        .env("DAYBOOK_PASSWORD_HASH", &hash)
        .env("DAYBOOK_TEST_PASSWORD", PASSWORD)
        .args(["--date", "2024-01-01", "write", "secret"])
        .assert()
        .success();
}

#[test]
#[serial]
fn test_wrong_password_exits_before_opening_database() {
    let dir = tempdir().unwrap();
    let hash = hash_password(PASSWORD).unwrap();

    set_up_command(dir.path())
        .env("DAYBOOK_PASSWORD_HASH", &hash)
        .env("DAYBOOK_TEST_PASSWORD", "guess")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Incorrect password."));

    assert!(!dir.path().join("diary.db").exists());
}

#[test]
#[serial]
fn test_malformed_hash_is_reported() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .env("DAYBOOK_PASSWORD_HASH", "not-a-phc-string")
        .env("DAYBOOK_TEST_PASSWORD", PASSWORD)
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid password hash"));
}

#[test]
#[serial]
fn test_no_hash_means_no_prompt() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .arg("list")
        .assert()
        .success();
}

#[test]
#[serial]
fn test_hash_password_output_unlocks_the_gate() {
    let dir = tempdir().unwrap();

    let output = set_up_command(dir.path())
        .env("DAYBOOK_TEST_PASSWORD", PASSWORD)
        .arg("hash-password")
        .output()
        .unwrap();
    assert!(output.status.success());

    let hash = String::from_utf8(output.stdout).unwrap();
    assert!(hash.starts_with("$argon2"));

    set_up_command(dir.path())
        .env("DAYBOOK_PASSWORD_HASH", hash.trim())
        .env("DAYBOOK_TEST_PASSWORD", PASSWORD)
        .arg("list")
        .assert()
        .success();
}

#[test]
#[serial]
fn test_debug_logs_do_not_leak_entry_text() {
    let dir = tempdir().unwrap();

    set_up_command(dir.path())
        .env("DAYBOOK_LOG", "trace")
        .args(["--date", "2024-01-01", "write", "my deepest secret"])
        .assert()
        .success()
        .stderr(predicate::str::contains("my deepest secret").not());
}
