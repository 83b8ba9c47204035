#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn settings_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("settingsfile").unwrap();
    cmd.env("SETTINGSFILE_CONFIG_DIR", temp.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_write_then_cat() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("app.conf");

    settings_cmd(&temp)
        .args(["write", file.to_str().unwrap(), "volume=7\nmuted=no\n"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 18 bytes"));

    settings_cmd(&temp)
        .args(["cat", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout("volume=7\nmuted=no\n");
}

#[test]
fn test_write_from_stdin_and_append() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("app.conf");

    settings_cmd(&temp)
        .args(["write", file.to_str().unwrap()])
        .write_stdin("a=1\n")
        .assert()
        .success();

    settings_cmd(&temp)
        .args(["append", file.to_str().unwrap(), "b=2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Appended 3 bytes"));

    assert_eq!(fs::read(&file).unwrap(), b"a=1\nb=2");
}

#[test]
fn test_lines_flags_missing_final_newline() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("app.conf");
    fs::write(&file, "first\nsecond").unwrap();

    settings_cmd(&temp)
        .args(["lines", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 first"))
        .stdout(predicate::str::contains("2 second (no newline at end)"));
}

#[test]
fn test_lines_on_missing_file_is_empty() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("nothing.conf");

    settings_cmd(&temp)
        .args(["lines", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("(empty)"));

    assert!(!file.exists());
}

#[test]
fn test_deferred_config_still_persists_write() {
    let temp = tempfile::tempdir().unwrap();
    let file = temp.path().join("app.conf");

    settings_cmd(&temp)
        .args(["config", "flush", "deferred"])
        .assert()
        .success()
        .stdout(predicate::str::contains("flush set to deferred"));

    settings_cmd(&temp)
        .args(["config", "flush"])
        .assert()
        .success()
        .stdout("deferred\n");

    settings_cmd(&temp)
        .args(["write", file.to_str().unwrap(), "x=1\n"])
        .assert()
        .success();

    assert_eq!(fs::read(&file).unwrap(), b"x=1\n");
}

#[test]
fn test_config_lists_all_keys() {
    let temp = tempfile::tempdir().unwrap();

    settings_cmd(&temp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("flush = on-close"))
        .stdout(predicate::str::contains("fsync = true"));
}

#[test]
fn test_bad_config_value_fails() {
    let temp = tempfile::tempdir().unwrap();

    settings_cmd(&temp)
        .args(["config", "flush", "sometimes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid value for flush"));
}

#[test]
fn test_unwritable_target_exits_with_io_code() {
    let temp = tempfile::tempdir().unwrap();
    // A non-empty directory cannot be replaced by a file.
    let target = temp.path().join("dir.conf");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep"), "x").unwrap();

    settings_cmd(&temp)
        .args(["write", target.to_str().unwrap(), "x=1"])
        .assert()
        .failure()
        .code(3);

    assert!(target.join("keep").exists());
}
