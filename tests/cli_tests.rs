//! CLI integration tests for monte_pi.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the monte_pi binary with `dir` as cwd, home and config dir.
#[allow(deprecated)]
fn cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("monte_pi").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join(".config"))
        .env("RUST_LOG", "warn");
    cmd
}

#[test]
fn test_help() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Distributed Monte Carlo estimate of pi"));
}

#[test]
fn test_prompted_run_appends_log() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("runs.log");

    cmd(&temp)
        .args(["-n", "4", "--seed", "1", "--log-file"])
        .arg(&log)
        .write_stdin("300000\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Please enter the number of tosses:"))
        .stdout(predicate::str::contains("pi: 3.1"))
        .stdout(predicate::str::contains("Total time taken:"));

    let content = fs::read_to_string(&log).unwrap();
    assert!(content.starts_with("3, 300000, "), "unexpected log line: {content}");
    assert_eq!(content.lines().count(), 1);
}

#[test]
fn test_default_log_file_name() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-n", "2", "--samples", "1000"])
        .assert()
        .success();
    assert!(temp.path().join("monte_pi_runs.log").exists());
}

#[test]
fn test_garbage_input_fails() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-n", "3"])
        .write_stdin("many\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid sample count"));
}

#[test]
fn test_lone_participant_fails_fast() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-n", "1", "--samples", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("need at least 2"));
}

#[test]
fn test_lone_participant_may_sample_itself() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-n", "1", "--placement", "include-coordinator", "--samples", "10000"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pi: "));
}

#[test]
fn test_zero_tosses_is_undefined() {
    let temp = TempDir::new().unwrap();
    cmd(&temp)
        .args(["-n", "3", "--samples", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pi: undefined"));
}

#[test]
fn test_unwritable_log_still_reports() {
    let temp = TempDir::new().unwrap();
    let log = temp.path().join("no-such-dir").join("runs.log");
    cmd(&temp)
        .args(["-n", "2", "--samples", "1000", "--log-file"])
        .arg(&log)
        .assert()
        .success()
        .stdout(predicate::str::contains("pi: "))
        .stderr(predicate::str::contains("could not write run log"));
}

#[test]
#[cfg(target_os = "linux")]
fn test_user_config_dir_is_read() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join(".config").join("monte_pi");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.yml"), "participants: 5\n").unwrap();

    cmd(&temp)
        .args(["--samples", "4000", "--seed", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("participants: 5 (4 sampling)"));
}

#[test]
fn test_placement_flag_overrides_config_file() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("monte_pi.yml"), "participants: 3\nplacement: include-coordinator\n").unwrap();

    cmd(&temp)
        .args(["--samples", "3000", "--placement", "exclude-coordinator"])
        .assert()
        .success()
        .stdout(predicate::str::contains("participants: 3 (2 sampling)"));
}

#[test]
fn test_config_file_and_tasks_runtime() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("monte_pi.yml");
    fs::write(&config, "participants: 3\nplacement: include-coordinator\nruntime: tasks\n").unwrap();

    cmd(&temp)
        .args(["--samples", "30000", "--seed", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("participants: 3 (3 sampling)"));
    let content = fs::read_to_string(temp.path().join("monte_pi_runs.log")).unwrap();
    assert!(content.starts_with("3, 30000, "));
}
