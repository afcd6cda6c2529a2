//! Integration tests for the tripframe CLI

use std::process::Command;

fn tripframe() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_tripframe"));
    // Keep the user's config file out of the way.
    command.args(["--config", "/nonexistent/tripframe.toml"]);
    command
}

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_tripframe"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("frame"));
    assert!(stdout.contains("camera"));
}

#[test]
fn test_frame_command() {
    let output = tripframe()
        .args(["frame", "0,0", "0,10", "--width", "1000", "--height", "1000"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["zoom"], 6);
    assert!((value["center"]["longitude"].as_f64().unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn test_frame_rejects_bad_point() {
    let output = tripframe()
        .args(["frame", "95,0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("out of range"));
}

#[test]
fn test_camera_command_for_day() {
    let file = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/kyoto.json");
    let output = tripframe()
        .args(["camera", file, "--day", "1", "--width", "800", "--height", "600"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["title"], "Two days in Kyoto");
    assert_eq!(value["poi_count"], 2);
    assert_eq!(
        value["stops"],
        serde_json::json!(["Arashiyama Bamboo Grove", "Tenryu-ji"])
    );
    assert!(value["warning"].is_null());
}

#[test]
fn test_camera_command_unknown_day() {
    let file = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/kyoto.json");
    let output = tripframe()
        .args(["camera", file, "--day", "4"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Day 4 not found"));
}

#[test]
fn test_config_error_shows_user_message() {
    let output = tripframe()
        .env("TRIPFRAME_LOGGING__LEVEL", "loud")
        .args(["frame", "0,0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid log level 'loud'"));
    assert!(stderr.contains("Please check your config file"));
}
