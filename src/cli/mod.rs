//! CLI command handlers for Hyperlayer.
//!
//! This module provides headless, scriptable access to the compiler for
//! automation, testing, and CI integration.

pub mod common;
pub mod generate;
pub mod inspect;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult};
pub use generate::GenerateArgs;
pub use inspect::InspectArgs;
pub use validate::ValidateArgs;
