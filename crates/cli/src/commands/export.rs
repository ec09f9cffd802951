//! Export a saved ledger as delimited text

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use crate::utils;

/// Export a saved ledger as delimited text
#[derive(Parser)]
pub struct Export {
    /// Output file
    #[arg(value_name = "FILE")]
    output: PathBuf,

    /// Field delimiter
    #[arg(long, default_value = ",")]
    delimiter: char,

    /// Session ID to export (defaults to the most recent session)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Export {
    pub fn execute(self) -> Result<()> {
        let config = utils::runtime_config(self.data_dir);
        let session = utils::resume_session(&config, self.session)?;

        session
            .export_to(&self.output, self.delimiter)
            .with_context(|| format!("Failed to export to {}", self.output.display()))?;

        println!(
            "{} Exported {} checkpoints of {} to {}",
            style("✓").green().bold(),
            session.ledger().len(),
            style(session.id()).cyan(),
            self.output.display()
        );

        Ok(())
    }
}
