//! Generate command for the Karabiner document.

use crate::cli::common::{CliError, CliResult};
use crate::compiler;
use crate::config::Config;
use crate::keymap;
use crate::services::DocumentService;
use clap::Args;
use std::path::PathBuf;

/// Compile the keymap and write the Karabiner document
#[derive(Debug, Clone, Args)]
pub struct GenerateArgs {
    /// Output file (defaults to the Karabiner configuration path)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Skip the timestamped backup of an existing file
    #[arg(long)]
    pub no_backup: bool,

    /// Profile name override
    #[arg(long, value_name = "NAME")]
    pub profile: Option<String>,
}

impl GenerateArgs {
    /// Execute the generate command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();

        let keymap = keymap::default_keymap();
        let compiled = compiler::compile(&keymap)
            .map_err(|e| CliError::validation(format!("Compilation failed: {e}")))?;

        let profile_name = self
            .profile
            .clone()
            .unwrap_or_else(|| config.profile.name.clone());
        let document = compiled.to_document(&profile_name, config.profile.show_in_menu_bar);

        if self.stdout {
            let text = DocumentService::render(&document)
                .map_err(|e| CliError::io(format!("Failed to render document: {e}")))?;
            print!("{text}");
            return Ok(());
        }

        let path = match &self.out {
            Some(path) => path.clone(),
            None => config
                .paths
                .karabiner_config_path()
                .map_err(|e| CliError::io(format!("Failed to resolve output path: {e}")))?,
        };

        let backup = config.output.backup && !self.no_backup;
        DocumentService::write(&document, &path, backup)
            .map_err(|e| CliError::io(format!("Failed to write document: {e}")))?;

        println!(
            "✓ Generated {} rules ({} manipulators, {} state variables)",
            compiled.rules.len(),
            compiled.manipulator_count(),
            compiled.variables.len()
        );
        println!("  Output: {}", path.display());

        Ok(())
    }
}
