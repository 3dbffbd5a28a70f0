//! Inspect command: show compiled chords and state variables.

use crate::cli::common::{CliError, CliResult};
use crate::compiler;
use crate::config::Config;
use crate::keymap;
use crate::models::{Action, ActionKind, Keymap, LayerNode, TriggerKey};
use clap::Args;
use serde::Serialize;

/// Show the compiled chord table and state-variable ownership
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON body emitted by `inspect --json`.
#[derive(Debug, Clone, Serialize)]
struct InspectResponse {
    profile: String,
    rules: usize,
    manipulators: usize,
    chords: Vec<ChordSummary>,
    variables: Vec<VariableSummary>,
}

#[derive(Debug, Clone, Serialize)]
struct ChordSummary {
    chord: String,
    action: String,
}

#[derive(Debug, Clone, Serialize)]
struct VariableSummary {
    name: String,
    owner: String,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load().unwrap_or_default();

        let keymap = keymap::default_keymap();
        let compiled = compiler::compile(&keymap)
            .map_err(|e| CliError::validation(format!("Compilation failed: {e}")))?;

        let mut chords = Vec::new();
        collect_chords(&keymap, "hyper", &mut chords)?;

        let response = InspectResponse {
            profile: config.profile.name.clone(),
            rules: compiled.rules.len(),
            manipulators: compiled.manipulator_count(),
            chords,
            variables: compiled
                .variables
                .iter()
                .map(|(name, owner)| VariableSummary {
                    name: name.clone(),
                    owner: owner.clone(),
                })
                .collect(),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("Profile: {}", response.profile);
        println!(
            "Rules: {} ({} manipulators)",
            response.rules, response.manipulators
        );

        let width = response
            .chords
            .iter()
            .map(|c| c.chord.len())
            .max()
            .unwrap_or(0);

        println!("\nChords:");
        for chord in &response.chords {
            println!("  {:width$}  {}", chord.chord, chord.action);
        }

        println!("\nState variables:");
        let name_width = response
            .variables
            .iter()
            .map(|v| v.name.len())
            .max()
            .unwrap_or(0);
        for variable in &response.variables {
            println!("  {:name_width$}  {}", variable.name, variable.owner);
        }

        Ok(())
    }
}

/// Walks the keymap collecting one row per leaf chord.
fn collect_chords(layer: &Keymap, prefix: &str, out: &mut Vec<ChordSummary>) -> CliResult<()> {
    for (spelling, node) in layer.entries() {
        let trigger = TriggerKey::parse(spelling)
            .map_err(|e| CliError::validation(format!("Bad trigger in keymap: {e}")))?;
        let chord = format!("{prefix} + {trigger}");
        match node {
            LayerNode::Leaf(action) => out.push(ChordSummary {
                chord,
                action: describe(action),
            }),
            LayerNode::Layer(children) => collect_chords(children, &chord, out)?,
        }
    }
    Ok(())
}

/// A one-line description of what a leaf does.
fn describe(action: &Action) -> String {
    if let Some(description) = action.description() {
        return description.to_string();
    }
    match action.kind() {
        ActionKind::SendKeys(keys) => keys
            .iter()
            .map(|press| press.key_code.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        ActionKind::ShellCommand(command) => command.clone(),
        ActionKind::OpenTarget(target) => format!("open {target}"),
    }
}
