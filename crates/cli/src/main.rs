//! meup command-line entry point.
//!
//! Reports render on stdout; logging goes to stderr so JSON output stays
//! pipeable.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::RangeArgs;

/// TikTok Shop advertising reports from the terminal.
#[derive(Parser, Debug)]
#[command(name = "meup")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Daily ads-overview metrics
    Overview(RangeArgs),

    /// GMV-Max product metrics
    GmvMax(RangeArgs),

    /// List quick-select presets and their current bounds
    Presets,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Overview(args) => commands::overview::run(&args).await,
        Commands::GmvMax(args) => commands::gmv_max::run(&args).await,
        Commands::Presets => commands::presets::run(),
    }
}
