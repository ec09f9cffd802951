//! List or delete saved sessions

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use turnline_runtime::LedgerRepository;

use crate::utils;

/// List or delete saved sessions
#[derive(Parser)]
pub struct Sessions {
    /// Delete this session instead of listing
    #[arg(long, value_name = "SESSION")]
    delete: Option<String>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Sessions {
    pub fn execute(self) -> Result<()> {
        let config = utils::runtime_config(self.data_dir);
        let repository = utils::open_repository(&config)?;

        if let Some(id) = self.delete {
            if !repository.exists(&id)? {
                anyhow::bail!("Session not found: {id}");
            }
            repository.delete(&id)?;
            println!("{} Deleted {}", style("✓").green().bold(), style(&id).cyan());
            return Ok(());
        }

        let sessions = repository.list_sessions()?;
        if sessions.is_empty() {
            println!(
                "{}",
                style(format!(
                    "No sessions in {}",
                    repository.base_dir().display()
                ))
                .dim()
            );
            return Ok(());
        }

        println!(
            "{} {}",
            style("Sessions in").bold().cyan(),
            repository.base_dir().display()
        );
        for id in sessions {
            match repository.load(&id) {
                Ok(Some(snapshot)) => println!(
                    "  {} {} actors, {} actions, horizon {}{}",
                    style(&id).cyan(),
                    snapshot.ledger.roster_names().len(),
                    snapshot.ledger.action_count(),
                    snapshot.ledger.horizon(),
                    snapshot
                        .label
                        .map(|label| format!(" ({label})"))
                        .unwrap_or_default()
                ),
                Ok(None) => {}
                Err(err) => println!("  {} {}", style(&id).red(), style(err).dim()),
            }
        }

        Ok(())
    }
}
