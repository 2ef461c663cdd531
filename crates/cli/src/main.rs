//! Switchyard CLI: the main entry point.
//!
//! Commands:
//! - `ask`      Route a query to the best specialist
//! - `agent`    Run one specialist directly
//! - `demo`     Run the canned demo queries through the router
//! - `onboard`  Write a default config and starter knowledge base
//! - `doctor`   Diagnose configuration health

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;

use commands::agent::SpecialistKind;

#[derive(Parser)]
#[command(
    name = "switchyard",
    about = "Switchyard: route questions to a ReAct math agent or a grounded research agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use this config file instead of ~/.switchyard/config.toml
    #[arg(short, long, global = true, env = "SWITCHYARD_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a query through the dispatcher
    Ask {
        /// The question to answer
        query: String,
    },

    /// Run a single specialist, bypassing the router
    Agent {
        /// Which specialist to run
        #[arg(value_enum)]
        specialist: SpecialistKind,

        /// The question to answer
        query: String,
    },

    /// Run the built-in demo queries
    Demo,

    /// Initialize configuration and knowledge base
    Onboard,

    /// Diagnose configuration health
    Doctor,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
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

    let config = cli.config.as_deref();
    let code = match cli.command {
        Commands::Ask { query } => commands::ask::run(config, &query).await?,
        Commands::Agent { specialist, query } => commands::agent::run(config, specialist, &query).await?,
        Commands::Demo => commands::demo::run(config).await?,
        Commands::Onboard => commands::onboard::run(config).await?,
        Commands::Doctor => commands::doctor::run(config).await?,
    };

    Ok(code)
}
