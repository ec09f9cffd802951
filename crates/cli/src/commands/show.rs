//! Print a saved ledger
//!
//! Renders one line per checkpoint; the acting member is highlighted.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::style;
use turnline_core::EventKind;
use turnline_runtime::{Session, TableRow};

use crate::utils;

/// Print a saved ledger
#[derive(Parser)]
pub struct Show {
    /// Session ID to show (defaults to the most recent session)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Show every per-actor column instead of speed and remaining distance
    #[arg(short, long)]
    wide: bool,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// One line per checkpoint
    Table,
    /// Table rows as JSON
    Json,
    /// The full saved ledger as JSON
    Ledger,
}

impl Show {
    pub fn execute(self) -> Result<()> {
        let config = utils::runtime_config(self.data_dir);
        let session = utils::resume_session(&config, self.session)?;

        match self.format {
            OutputFormat::Table => {
                print_session_header(&session);
                print_table(&session.table(), self.wide);
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&session.table())?);
            }
            OutputFormat::Ledger => {
                println!("{}", serde_json::to_string_pretty(session.ledger())?);
            }
        }

        Ok(())
    }
}

pub(crate) fn print_session_header(session: &Session) {
    let ledger = session.ledger();
    println!("{} {}", style("Session:").bold().cyan(), session.id());
    println!("{} {}", style("Horizon:").bold().cyan(), ledger.horizon());
    println!(
        "{} {} checkpoints, {} actions",
        style("History:").bold().cyan(),
        ledger.len(),
        ledger.action_count()
    );
    println!();
}

pub(crate) fn print_table(rows: &[TableRow], wide: bool) {
    let Some(first) = rows.first() else {
        return;
    };

    let mut header = format!("{:>4} {:>10} {:<16} {:<12}", "#", "time", "event", "actor");
    for actor in &first.actors {
        if wide {
            header.push_str(&format!(
                " | {:<12} {:>7} {:>7} {:>7} {:>9} {:>9} {:>9}",
                actor.name, "base", "delta", "speed", "orig", "offset", "remain"
            ));
        } else {
            header.push_str(&format!(" | {:<12} {:>7} {:>9}", actor.name, "speed", "remain"));
        }
    }
    println!("{}", style(header).bold());

    for row in rows {
        let event = match row.kind {
            EventKind::Initial => style(row.kind.to_string()).dim(),
            EventKind::Action => style(row.kind.to_string()).green(),
            EventKind::HorizonReached => style(row.kind.to_string()).yellow(),
        };
        let mut line = format!(
            "{:>4} {:>10.2} {:<16} {:<12}",
            row.index,
            row.time,
            event,
            row.triggerer.as_deref().unwrap_or("-")
        );

        for actor in &row.actors {
            let cells = if wide {
                format!(
                    " | {:<12} {:>7.2} {:>7.2} {:>7.2} {:>9.2} {:>9.2} {:>9.2}",
                    "",
                    actor.base_speed,
                    actor.delta_speed,
                    actor.current_speed,
                    actor.original_remaining,
                    actor.delta_distance,
                    actor.realtime_remaining
                )
            } else {
                format!(
                    " | {:<12} {:>7.2} {:>9.2}",
                    "", actor.current_speed, actor.realtime_remaining
                )
            };

            if actor.is_triggerer {
                line.push_str(&style(cells).cyan().to_string());
            } else {
                line.push_str(&cells);
            }
        }

        println!("{line}");
    }
}
