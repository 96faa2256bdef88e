use clap::{Parser, Subcommand};

mod commands;
mod config;

mod errors;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::commands::{build_cmd::BuildArgs, config_cmd::CheckConfigArgs};

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// TitleFeed CLI: Build distributor metadata feeds from book metadata
#[derive(Parser)]
#[command(name = "titlefeed")]
#[command(about = "Build distributor metadata CSV feeds from book metadata", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Map, validate and emit a batch of books
    #[command()]
    Build(BuildArgs),

    /// Resolve and print the effective configuration for a layer set
    CheckConfig(CheckConfigArgs),

    /// Show the CLI version
    Version,
}

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("TITLEFEED_LOG"))
        .init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Build(args) => match commands::build_cmd::execute(args).await {
            Ok(summary) => {
                if summary.total > 0 && summary.skipped == summary.total {
                    println!("No records were emitted");
                    std::process::exit(1);
                }
                std::process::exit(0);
            }
            Err(e) => {
                error!("Error: {e}");
                std::process::exit(2);
            }
        },
        Commands::CheckConfig(args) => {
            if let Err(e) = commands::config_cmd::execute(args) {
                error!("Error: {e}");
                std::process::exit(2);
            }
        }
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "titlefeed version {}",
                option_env!("TITLEFEED_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            std::process::exit(0);
        }
    }
}
