//! Shared CLI plumbing: errors, exit codes, and JSON response shapes.

use serde::Serialize;

/// Result type for CLI command execution.
pub type CliResult<T> = Result<T, CliError>;

/// A CLI-level error whose kind maps to a process exit code.
#[derive(Debug)]
pub struct CliError {
    kind: CliErrorKind,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CliErrorKind {
    /// The keymap is structurally invalid.
    Validation,
    /// An I/O or serialization failure.
    Io,
}

impl CliError {
    /// A validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// An I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// The process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self.kind {
            CliErrorKind::Validation => 1,
            CliErrorKind::Io => 2,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// JSON body emitted by `validate --json`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResponse {
    /// Whether the keymap compiles.
    pub valid: bool,
    /// Errors and warnings, most severe first.
    pub errors: Vec<ValidationMessage>,
    /// Per-check pass/fail summary.
    pub checks: ValidationChecks,
}

/// One validation message.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationMessage {
    /// `"error"` or `"warning"`.
    pub severity: String,
    /// Human-readable message.
    pub message: String,
    /// Layer-tree path of the offending entry, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Pass/fail status per check category.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationChecks {
    /// Trigger spellings resolve.
    pub triggers: String,
    /// No duplicate triggers within a layer.
    pub uniqueness: String,
    /// State-variable allocation is collision-free.
    pub variables: String,
}

impl ValidationChecks {
    /// All checks passing.
    #[must_use]
    pub fn all_passed() -> Self {
        Self {
            triggers: "passed".to_string(),
            uniqueness: "passed".to_string(),
            variables: "passed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::validation("bad").exit_code(), 1);
        assert_eq!(CliError::io("worse").exit_code(), 2);
    }

    #[test]
    fn test_message_path_is_omitted_when_absent() {
        let message = ValidationMessage {
            severity: "warning".to_string(),
            message: "empty sublayer".to_string(),
            path: None,
        };
        let value = serde_json::to_value(&message).unwrap();
        assert!(value.get("path").is_none());
    }
}
