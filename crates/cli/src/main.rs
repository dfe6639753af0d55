//! Promptsmith CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize the config file
//! - `wizard`  — Run the guided prompt-construction wizard

use clap::{Parser, Subcommand};

mod auth;
mod commands;
mod term;

#[derive(Parser)]
#[command(
    name = "promptsmith",
    about = "Promptsmith — build a prompt for your AI-powered IDE, even if you don't know where to start",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize the configuration file
    Onboard,

    /// Run the guided prompt-construction wizard
    Wizard,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Wizard => commands::wizard::run().await?,
    }

    Ok(())
}
