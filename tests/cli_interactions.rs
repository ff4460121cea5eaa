//! CLI option tests
//!
//! These tests run the binary without any network access and check argument
//! handling, configuration validation and exit codes.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const CONFIG_VARS: [&str; 10] = [
    "PROXY_URL",
    "API_KEY",
    "SOURCE_COUNT",
    "TEST_DURATION",
    "PLAYLIST_TIMEOUT",
    "STREAM_TIMEOUT",
    "COOLDOWN_SECONDS",
    "ENABLE_COLOR",
    "LOG_LEVEL",
    "LOG_FORMAT",
];

/// Command running in an empty directory with a clean configuration environment
fn create_test_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("iptv-bench").unwrap();
    cmd.current_dir(dir.path());
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--proxy-url"))
        .stdout(predicate::str::contains("--sources"))
        .stdout(predicate::str::contains("--duration"))
        .stdout(predicate::str::contains("--no-color"));
}

#[test]
fn test_version_flag() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_env_help_prints_variables_without_running() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--env-help", "--proxy-url", "http://127.0.0.1:9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("SOURCE_COUNT"))
        .stdout(predicate::str::contains("COOLDOWN_SECONDS"))
        .stdout(predicate::str::contains("Configuration Priority"))
        .stdout(predicate::str::contains("TEST SOURCE").not());
}

#[test]
fn test_init_env_writes_example_file() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .arg("--init-env")
        .assert()
        .success()
        .stdout(predicate::str::contains(".env.example"));

    let content = fs::read_to_string(dir.path().join(".env.example")).unwrap();
    assert!(content.contains("# PROXY_URL="));
    assert!(content.contains("# SOURCE_COUNT=4"));
}

#[test]
fn test_debug_warns_about_invalid_env_values() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .env("COOLDOWN_SECONDS", "90")
        .args(["--debug", "--no-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Warning: Configuration error: COOLDOWN_SECONDS must be between 0 and 60"));
}

#[test]
fn test_invalid_source_count_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--sources", "0", "--no-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Source count must be greater than 0"));
}

#[test]
fn test_invalid_proxy_url_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--proxy-url", "ftp://proxy.local", "--no-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_duration_out_of_range() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--duration", "601", "--no-color"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Test duration cannot exceed 600 seconds"));
}

#[test]
fn test_non_numeric_duration_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .args(["--duration", "ten"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid number of seconds"));
}

#[test]
fn test_invalid_environment_value() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .env("SOURCE_COUNT", "many")
        .arg("--no-color")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("SOURCE_COUNT"));
}

#[test]
fn test_invalid_log_level() {
    let dir = TempDir::new().unwrap();
    create_test_cmd(&dir)
        .env("LOG_LEVEL", "loud")
        .arg("--no-color")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("LOG_LEVEL"));
}

#[test]
fn test_env_file_is_validated() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "COOLDOWN_SECONDS=120\n").unwrap();

    create_test_cmd(&dir)
        .arg("--no-color")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cooldown cannot exceed 60 seconds"));
}

#[test]
fn test_cli_beats_env_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(".env"), "SOURCE_COUNT=0\n").unwrap();

    // The invalid .env value is replaced before validation, so the run starts
    // and fails fast against a closed local port.
    create_test_cmd(&dir)
        .args([
            "--sources", "1",
            "--proxy-url", "http://127.0.0.1:9",
            "--playlist-timeout", "2",
            "--no-color",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- 🧪 TEST SOURCE #0 ---"))
        .stdout(predicate::str::contains("❌ CRITICAL ERROR:"));
}
