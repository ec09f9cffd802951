//! Simulate a roster and start a session
//!
//! Without `--actor` the four-member default roster is used.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use turnline_core::{ActorSpec, DEFAULT_ROSTER};
use turnline_runtime::Session;

use super::show::{print_session_header, print_table};
use crate::utils;

/// Simulate a roster up to the horizon and save the ledger
#[derive(Parser)]
pub struct Simulate {
    /// Roster member as NAME=SPEED (repeatable, in turn-priority order)
    #[arg(short, long = "actor", value_name = "NAME=SPEED", value_parser = parse_actor)]
    actors: Vec<ActorSpec>,

    /// Simulation horizon (defaults to TURNLINE_HORIZON or 1500)
    #[arg(long, value_name = "TIME")]
    horizon: Option<f64>,

    /// Session ID to save under (defaults to TURNLINE_SESSION_ID or a generated one)
    #[arg(short, long, value_name = "SESSION")]
    session: Option<String>,

    /// Custom data directory (defaults to platform-specific location)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Print the resulting timeline
    #[arg(short, long)]
    print: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let mut config = utils::runtime_config(self.data_dir);
        if let Some(horizon) = self.horizon {
            config = config.with_horizon(horizon);
        }

        let actors = if self.actors.is_empty() {
            DEFAULT_ROSTER.iter().copied().map(ActorSpec::from).collect()
        } else {
            self.actors
        };

        let mut builder = Session::builder(config.clone());
        if let Some(id) = self.session {
            builder = builder.session_id(id);
        }
        if config.enable_persistence {
            builder = builder.repository(utils::open_repository(&config)?);
        }

        let session = builder
            .start(&actors)
            .context("Failed to simulate roster")?;

        if self.print {
            print_session_header(&session);
            print_table(&session.table(), false);
            println!();
        }

        if session.is_persistent() {
            println!(
                "{} Saved session {} ({} actions before {})",
                style("✓").green().bold(),
                style(session.id()).cyan(),
                session.ledger().action_count(),
                session.ledger().horizon()
            );
        } else {
            println!(
                "{} Persistence disabled; session {} was not saved",
                style("!").yellow().bold(),
                style(session.id()).cyan()
            );
        }

        Ok(())
    }
}

fn parse_actor(raw: &str) -> Result<ActorSpec, String> {
    let (name, speed) = raw
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=SPEED, got `{raw}`"))?;
    let base_speed = speed
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid speed `{speed}`: {err}"))?;

    Ok(ActorSpec::new(name.trim(), base_speed))
}
