//! Validation command for the keymap.

use crate::cli::common::{
    CliError, CliResult, ValidationChecks, ValidationMessage, ValidationResponse,
};
use crate::compiler::{self, StructuralError};
use crate::keymap;
use clap::Args;

/// Check the keymap for structural errors
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let report = compiler::validate(&keymap::default_keymap());

        let mut checks = ValidationChecks::all_passed();
        let mut messages = Vec::new();

        for error in &report.errors {
            let path = match error {
                StructuralError::InvalidTrigger { path, .. } => {
                    checks.triggers = "failed".to_string();
                    Some(path.clone())
                }
                StructuralError::DuplicateTrigger { path, .. } => {
                    checks.uniqueness = "failed".to_string();
                    Some(path.clone())
                }
                StructuralError::VariableCollision { second, .. } => {
                    checks.variables = "failed".to_string();
                    Some(second.clone())
                }
            };

            messages.push(ValidationMessage {
                severity: "error".to_string(),
                message: error.to_string(),
                path,
            });
        }

        for warning in &report.warnings {
            messages.push(ValidationMessage {
                severity: "warning".to_string(),
                message: warning.to_string(),
                path: None,
            });
        }

        let response = ValidationResponse {
            valid: report.is_valid(),
            errors: messages,
            checks,
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
        } else {
            if response.valid {
                println!("✓ Validation passed");
            } else {
                println!("✗ Validation failed");
            }

            println!("\nChecks:");
            println!("  Triggers:   {}", response.checks.triggers);
            println!("  Uniqueness: {}", response.checks.uniqueness);
            println!("  Variables:  {}", response.checks.variables);

            if !response.errors.is_empty() {
                println!("\nIssues:");
                for message in &response.errors {
                    let prefix = if message.severity == "error" {
                        "  ✗"
                    } else {
                        "  ⚠"
                    };
                    println!("{} {}", prefix, message.message);
                }
            }
        }

        if !response.valid {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && response.errors.iter().any(|m| m.severity == "warning") {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
