//! Turn-order ledger command-line frontend.
//!
//! Run with: `turnline <command>`

mod commands;
mod utils;

use anyhow::Result;
use clap::Parser;
use commands::{Edit, Export, Sessions, Show, Simulate};

/// Simulate and retroactively edit a turn-order timeline
#[derive(Parser)]
#[command(name = "turnline")]
#[command(about = "Deterministic turn-order simulator with an editable history", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Simulate a roster up to the horizon and save the ledger
    Simulate(Simulate),

    /// Edit one actor at one checkpoint and recompute the timeline
    Edit(Edit),

    /// Print a saved ledger
    Show(Show),

    /// Export a saved ledger as delimited text
    Export(Export),

    /// List or delete saved sessions
    Sessions(Sessions),
}

fn main() -> Result<()> {
    // Load .env file if it exists (for SAVE_DATA_DIR and other env vars)
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Edit(cmd) => cmd.execute(),
        Command::Show(cmd) => cmd.execute(),
        Command::Export(cmd) => cmd.execute(),
        Command::Sessions(cmd) => cmd.execute(),
    }
}
