//! End-to-end tests for `hyperlayer validate`.

use std::process::Command;

/// Path to the hyperlayer binary
fn hyperlayer_bin() -> &'static str {
    env!("CARGO_BIN_EXE_hyperlayer")
}

#[test]
fn test_validate_default_keymap_passes() {
    let output = Command::new(hyperlayer_bin())
        .arg("validate")
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Default keymap should validate. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("✓") || stdout.contains("passed"),
        "Output should indicate success"
    );
}

#[test]
fn test_validate_json_response_shape() {
    let output = Command::new(hyperlayer_bin())
        .args(["validate", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["valid"], true, "Should be valid");
    assert_eq!(
        result["errors"].as_array().unwrap().len(),
        0,
        "Should have no errors"
    );
    assert_eq!(result["checks"]["triggers"], "passed");
    assert_eq!(result["checks"]["uniqueness"], "passed");
    assert_eq!(result["checks"]["variables"], "passed");
}

#[test]
fn test_validate_strict_mode_passes_without_warnings() {
    let output = Command::new(hyperlayer_bin())
        .args(["validate", "--strict"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
}
