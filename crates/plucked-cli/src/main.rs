//! Plucked CLI - render Karplus-Strong tones to stdout.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "plucked")]
#[command(author, version, about = "Karplus-Strong plucked string synthesizer", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pluck a string with a triangle, sawtooth or noise burst
    Pluck(commands::pluck::PluckArgs),

    /// Render a factory or user preset
    Preset(commands::preset::PresetArgs),

    /// List and manage tone presets
    Presets(commands::presets::PresetsArgs),
}

/// Logs go to stderr so rendered samples on stdout stay clean.
///
/// `-v` overrides `RUST_LOG`; without either the level is `warn`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Pluck(args) => commands::pluck::run(args),
        Commands::Preset(args) => commands::preset::run(args),
        Commands::Presets(args) => commands::presets::run(args),
    }
}
