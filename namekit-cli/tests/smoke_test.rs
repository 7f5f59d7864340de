//! Smoke tests for namekit-cli
//!
//! These run the built binary against the in-memory defaults; nothing
//! touches the network or the user's files.

use std::process::{Command, Output};

fn namekit(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_namekit"))
        .args(args)
        .output()
        .expect("Failed to execute namekit")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !output.status.success() {
        eprintln!("stdout: {}", stdout);
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
    }
    serde_json::from_str(&stdout).expect("stdout should be JSON")
}

/// Test that the CLI can show help
#[test]
fn test_cli_help() {
    let output = namekit(&["--help"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for command in ["validate", "quote", "simulate", "config"] {
        assert!(stdout.contains(command), "Help should mention '{}'", command);
    }
}

/// Test that version is shown
#[test]
fn test_cli_version() {
    let output = namekit(&["--version"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("namekit"));
}

#[test]
fn test_validate_json() {
    let output = namekit(&["validate", "🐻ooga", "--json"]);
    assert!(output.status.success());

    let value = stdout_json(&output);
    assert_eq!(value["emoji_count"], 1);
    assert_eq!(value["tier"], "mixed");
    assert_eq!(value["units"].as_array().map(|u| u.len()), Some(5));
}

#[test]
fn test_validate_rejects_symbols() {
    let output = namekit(&["validate", "oo$ga"]);
    assert!(!output.status.success());
}

#[test]
fn test_quote_json() {
    let output = namekit(&["quote", "ooga", "--years", "2", "--json"]);
    assert!(output.status.success());

    let value = stdout_json(&output);
    assert_eq!(value["tier"], "plain");
    assert!(value["usd_total"].is_string() || value["usd_total"].is_number());
}

#[test]
fn test_quote_rejects_zero_years() {
    let output = namekit(&["quote", "ooga", "--years", "0"]);
    assert!(!output.status.success());
}

#[test]
fn test_simulate_json() {
    let output = namekit(&["simulate", "--json"]);
    assert!(output.status.success());

    let value = stdout_json(&output);
    let events = value["events"].as_array().expect("events array");
    assert!(events.iter().any(|e| e["type"] == "Claimed"));
    assert_eq!(value["owners"].as_array().map(|o| o.len()), Some(3));
}

#[test]
fn test_config_with_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("namekit.json");
    std::fs::write(&path, r#"{ "grace_period_secs": 60 }"#).unwrap();

    let output = namekit(&["--config", path.to_str().unwrap(), "config"]);
    assert!(output.status.success());
    let value = stdout_json(&output);
    assert_eq!(value["grace_period_secs"], 60);
}
