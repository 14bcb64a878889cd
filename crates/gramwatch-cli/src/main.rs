//! GramWatch CLI
//!
//! Command-line interface for the follower/followee monitor

use clap::{Parser, Subcommand};

mod commands;
mod env;

#[derive(Debug, Parser)]
#[command(name = "gramwatch")]
#[command(about = "Batch Instagram follower/followee monitor", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Execute one monitoring run (fetch, diff, notify, commit)
    Run(commands::run::RunArgs),
    /// Validate configuration without touching the network
    CheckConfig(commands::check_config::CheckConfigArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run(args) => commands::run::execute(args),
        Commands::CheckConfig(args) => commands::check_config::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
