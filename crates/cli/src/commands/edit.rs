//! Retroactive edit of a saved ledger
//!
//! Everything after the edited checkpoint is discarded and re-simulated.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use turnline_core::{Edit as LedgerEdit, EditField, HistoryLedger};

use super::show::print_table;
use crate::utils;

/// Edit one actor at one checkpoint and recompute the timeline
#[derive(Parser)]
pub struct Edit {
    /// Checkpoint index to edit (0 is the initial state)
    #[arg(value_name = "CHECKPOINT")]
    checkpoint: usize,

    /// Actor to edit, by roster index or name
    #[arg(value_name = "ACTOR")]
    actor: String,

    /// Offset to change: delta_speed or delta_distance
    #[arg(value_name = "FIELD")]
    field: EditField,

    /// New offset value
    #[arg(value_name = "VALUE", allow_negative_numbers = true)]
    value: f64,

    /// Session ID to edit (defaults to the most recent session)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the recomputed timeline
    #[arg(short, long)]
    print: bool,
}

impl Edit {
    pub fn execute(self) -> Result<()> {
        let config = utils::runtime_config(self.data_dir);
        let mut session = utils::resume_session(&config, self.session)?;

        let actor = resolve_actor(session.ledger(), &self.actor)?;
        let outcome = session.edit(LedgerEdit::new(
            self.checkpoint,
            actor,
            self.field,
            self.value,
        ))?;

        if let Some(advisory) = outcome.advisory {
            println!(
                "{} Remaining distance would be {:.2}; {} acts immediately",
                style("!").yellow().bold(),
                advisory.unclamped_remaining(),
                style(&self.actor).cyan()
            );
        }

        println!(
            "{} Set {} of {} at checkpoint {} to {} ({} discarded, {} recomputed)",
            style("✓").green().bold(),
            self.field,
            style(&self.actor).cyan(),
            self.checkpoint,
            self.value,
            outcome.discarded,
            outcome.appended
        );

        if !session.is_persistent() {
            println!(
                "{} Persistence disabled; the edit was not saved",
                style("!").yellow().bold()
            );
        }

        if self.print {
            println!();
            print_table(&session.table(), false);
        }

        Ok(())
    }
}

fn resolve_actor(ledger: &HistoryLedger, actor: &str) -> Result<usize> {
    if let Ok(index) = actor.parse::<usize>() {
        return Ok(index);
    }

    let names = ledger.roster_names();
    match names.iter().position(|name| name.eq_ignore_ascii_case(actor)) {
        Some(index) => Ok(index),
        None => bail!("Unknown actor `{actor}`; roster is {}", names.join(", ")),
    }
}
