//! Turnguide CLI - turn-by-turn guidance replay.
//!
//! This binary drives the turnguide library: it replays mock position
//! files against precomputed routes and manages the configuration
//! file.

mod commands;
mod error;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "turnguide",
    version = turnguide::VERSION,
    about = "Turn-by-turn guidance replay over precomputed routes"
)]
struct Cli {
    /// Print extra logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a mock position file against a precomputed route
    Simulate(commands::simulate::SimulateArgs),

    /// View and modify configuration settings
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Create a default configuration file
    Init,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Config { command } => commands::config::run(command),
        Commands::Init => commands::init::run(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
