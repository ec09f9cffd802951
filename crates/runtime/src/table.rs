//! Tabular view of a ledger.
//!
//! One [`TableRow`] per checkpoint, with the per-actor columns a frontend
//! renders: speeds, the raw remaining distance, the offset, and the remaining
//! distance with the offset applied.

use serde::Serialize;

use turnline_core::{Checkpoint, EventKind, HistoryLedger};

/// Derived per-actor columns of one row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActorColumns {
    pub name: String,
    pub base_speed: f64,
    pub delta_speed: f64,
    pub current_speed: f64,
    /// Remaining distance before the offset.
    pub original_remaining: f64,
    pub delta_distance: f64,
    /// Remaining distance with the offset applied.
    pub realtime_remaining: f64,
    /// True for the actor that acted at this checkpoint.
    pub is_triggerer: bool,
}

/// One checkpoint rendered as a row.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableRow {
    pub index: usize,
    pub time: f64,
    pub kind: EventKind,
    pub triggerer: Option<String>,
    pub actors: Vec<ActorColumns>,
}

impl TableRow {
    pub fn from_checkpoint(index: usize, checkpoint: &Checkpoint, action_distance: f64) -> Self {
        let actors = checkpoint
            .snapshot
            .iter()
            .enumerate()
            .map(|(actor_index, actor)| ActorColumns {
                name: actor.name().to_string(),
                base_speed: actor.base_speed(),
                delta_speed: actor.delta_speed(),
                current_speed: actor.current_speed(),
                original_remaining: actor.original_remaining(action_distance),
                delta_distance: actor.delta_distance(),
                realtime_remaining: actor.effective_remaining(action_distance),
                is_triggerer: checkpoint.triggerer == Some(actor_index),
            })
            .collect();

        Self {
            index,
            time: checkpoint.time,
            kind: checkpoint.kind,
            triggerer: checkpoint.triggerer_name().map(str::to_string),
            actors,
        }
    }
}

/// Renders every checkpoint of `ledger`, in order.
pub fn table_rows(ledger: &HistoryLedger) -> Vec<TableRow> {
    let action_distance = ledger.config().action_distance;
    ledger
        .checkpoints()
        .iter()
        .enumerate()
        .map(|(index, checkpoint)| TableRow::from_checkpoint(index, checkpoint, action_distance))
        .collect()
}
