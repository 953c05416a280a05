//! Integration tests for `ironcve config` command.
//!
//! Runs the compiled binary against real TOML files and checks the
//! rendered output and exit codes.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn ironcve(config_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ironcve"))
        .arg("--config")
        .arg(config_path)
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("IRONCVE_GENERAL_LOG_LEVEL")
        .env_remove("IRONCVE_GENERAL_LOG_FORMAT")
        .env_remove("IRONCVE_NORMALIZER_EXTRA_DENYLIST")
        .env_remove("IRONCVE_NORMALIZER_DESCRIPTION_FALLBACK")
        .env("NO_COLOR", "1")
        .output()
        .expect("should run ironcve binary")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_config_validate_valid_toml() {
    // Given: A valid config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ironcve.toml");
    fs::write(
        &config_path,
        r#"
[general]
log_level = "info"
log_format = "json"

[normalizer]
extra_denylist = ["https://github.com/acme/mirror"]
description_fallback = false
"#,
    )
    .expect("should write config");

    // When: Validating
    let output = ironcve(&config_path, &["config", "validate"]);

    // Then: Should succeed
    assert!(output.status.success(), "valid config should validate");
    assert!(stdout(&output).contains("VALID"));
}

#[test]
fn test_config_validate_malformed_toml() {
    // Given: A malformed TOML file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("bad.toml");
    fs::write(&config_path, "[general\nlog_level = \"info\"\n").expect("should write config");

    // When: Validating
    let output = ironcve(&config_path, &["config", "validate"]);

    // Then: Should report and exit with the config error code
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("INVALID"));
}

#[test]
fn test_config_validate_missing_file() {
    // Given: A nonexistent file path
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("missing.toml");

    // When: Validating
    let output = ironcve(&config_path, &["config", "validate"]);

    // Then: validate requires the file to exist
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("config file not found"));
}

#[test]
fn test_config_validate_empty_file_uses_defaults() {
    // Given: An empty config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("empty.toml");
    fs::write(&config_path, "").expect("should write empty file");

    // When: Validating
    let output = ironcve(&config_path, &["config", "validate"]);

    // Then: Every field has a default
    assert!(output.status.success());
}

#[test]
fn test_config_validate_rejects_non_http_denylist_prefix() {
    // Given: A denylist prefix that is not an http(s) URL
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ironcve.toml");
    fs::write(
        &config_path,
        "[normalizer]\nextra_denylist = [\"ftp://example.org/repo\"]\n",
    )
    .expect("should write config");

    // When: Validating
    let output = ironcve(&config_path, &["config", "validate"]);

    // Then: The offending field is named
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("normalizer.extra_denylist"));
}

#[test]
fn test_config_validate_rejects_unknown_log_level() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ironcve.toml");
    fs::write(&config_path, "[general]\nlog_level = \"verbose\"\n").expect("should write config");

    let output = ironcve(&config_path, &["config", "validate"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).contains("general.log_level"));
}

#[test]
fn test_config_show_full_config_defaults_when_missing() {
    // Given: No config file
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("missing.toml");

    // When: Showing the effective config
    let output = ironcve(&config_path, &["config", "show"]);

    // Then: Defaults for both sections are printed
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("[general]"));
    assert!(text.contains("log_level = \"warn\""));
    assert!(text.contains("[normalizer]"));
    assert!(text.contains("description_fallback = true"));
}

#[test]
fn test_config_show_normalizer_section() {
    // Given: A config with an extra denylist entry
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ironcve.toml");
    fs::write(
        &config_path,
        "[normalizer]\nextra_denylist = [\"https://github.com/acme/mirror\"]\n",
    )
    .expect("should write config");

    // When: Showing only the normalizer section
    let output = ironcve(&config_path, &["config", "show", "--section", "normalizer"]);

    // Then: Only that section is printed
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Configuration [normalizer]"));
    assert!(text.contains("https://github.com/acme/mirror"));
    assert!(!text.contains("log_level"));
}

#[test]
fn test_config_show_unknown_section() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("missing.toml");

    let output = ironcve(&config_path, &["config", "show", "--section", "storage"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown section: storage"));
}

#[test]
fn test_config_show_env_override() {
    // Given: No config file, but an env override for the log level
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("missing.toml");

    // When: Showing the general section with the override set
    let output = Command::new(env!("CARGO_BIN_EXE_ironcve"))
        .arg("--config")
        .arg(&config_path)
        .args(["config", "show", "--section", "general"])
        .env("IRONCVE_GENERAL_LOG_LEVEL", "debug")
        .env("NO_COLOR", "1")
        .output()
        .expect("should run ironcve binary");

    // Then: The effective value reflects the override
    assert!(output.status.success());
    assert!(stdout(&output).contains("log_level = \"debug\""));
}

#[test]
fn test_config_validate_json_output() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config_path = temp_dir.path().join("ironcve.toml");
    fs::write(&config_path, "[general]\nlog_format = \"json\"\n").expect("should write config");

    let output = ironcve(&config_path, &["--output", "json", "config", "validate"]);

    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(parsed["valid"].as_bool(), Some(true));
    assert_eq!(parsed["errors"].as_array().map(Vec::len), Some(0));
}
