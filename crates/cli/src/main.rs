//! Hydra Studios CLI - send booking inquiries and inspect the catalog.
//!
//! # Usage
//!
//! ```bash
//! # Send an inquiry through the local mail relay
//! hs-cli inquiry -n "Anna Svensson" -e anna@example.com -p mixing \
//!     -m "Two days in March" --accept-privacy
//!
//! # Send an inquiry directly to Web3Forms
//! hs-cli inquiry --via web3forms ...
//!
//! # List project types and studios
//! hs-cli catalog
//! ```
//!
//! # Commands
//!
//! - `inquiry` - Validate and submit a booking inquiry
//! - `catalog` - List project type and studio identifiers

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::inquiry::InquiryArgs;

#[derive(Parser)]
#[command(name = "hs-cli")]
#[command(author, version, about = "Hydra Studios CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate and submit a booking inquiry
    Inquiry(InquiryArgs),
    /// List project types and studios
    Catalog,
}

#[tokio::main]
async fn main() {
    // Defaults to info level if RUST_LOG is not set
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,reqwest=warn".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Inquiry(args) => commands::inquiry::send(&args).await?,
        Commands::Catalog => commands::catalog::list(),
    }
    Ok(())
}
