//! Hyperlayer - compile Hyper-key layers into Karabiner-Elements rules.
//!
//! The keymap is defined in code; this binary compiles it, checks it, and
//! writes the resulting `karabiner.json`.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hyperlayer::cli::{GenerateArgs, InspectArgs, ValidateArgs};

/// Hyperlayer - compile Hyper-key layers into Karabiner-Elements rules
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile the keymap and write the Karabiner document
    Generate(GenerateArgs),
    /// Check the keymap for structural errors
    Validate(ValidateArgs),
    /// Show the compiled chord table and state-variable ownership
    Inspect(InspectArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Generate(args) => args.execute(),
        Command::Validate(args) => args.execute(),
        Command::Inspect(args) => args.execute(),
    };

    if let Err(error) = result {
        eprintln!("Error: {error}");
        std::process::exit(error.exit_code());
    }
}
