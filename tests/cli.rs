//! Integration test: binary argument handling and startup failures that
//! happen before the terminal is touched.

use std::fs;
use std::process::Command;

fn happygrep() -> Command {
    Command::new(env!("CARGO_BIN_EXE_happygrep"))
}

#[test]
fn binary_prints_version() {
    let output = happygrep()
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(
        stdout.contains(env!("CARGO_PKG_VERSION")),
        "Expected version in output, got: {stdout}"
    );
}

#[test]
fn missing_pattern_prints_usage_and_fails() {
    let output = happygrep().output().expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("Usage:"), "got: {stderr}");
}

#[test]
fn invalid_config_file_fails_before_startup() {
    let path = std::env::temp_dir().join(format!("happygrep_cli_{}_bad.toml", std::process::id()));
    fs::write(&path, "tab_size = \"wide\"\n").unwrap();

    let output = happygrep()
        .arg("--config")
        .arg(&path)
        .arg("needle")
        .output()
        .expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("ParseError"), "got: {stderr}");
    fs::remove_file(path).ok();
}

#[test]
fn zero_width_in_config_is_rejected() {
    let path = std::env::temp_dir().join(format!("happygrep_cli_{}_zero.toml", std::process::id()));
    fs::write(&path, "name_width = 0\n").unwrap();

    let output = happygrep()
        .arg("--config")
        .arg(&path)
        .arg("needle")
        .output()
        .expect("Failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!output.status.success());
    assert!(stderr.contains("name_width"), "got: {stderr}");
    fs::remove_file(path).ok();
}
