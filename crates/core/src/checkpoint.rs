//! Checkpoint records produced by the engine and stored by the ledger.

use crate::actor::ActorState;

/// What happened at a checkpoint.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum EventKind {
    /// Roster as configured, at time zero.
    Initial,
    /// One actor completed its cycle and acted.
    Action,
    /// The clock reached the horizon; nothing follows.
    HorizonReached,
}

/// A recorded instant with a full, independent copy of every actor.
///
/// Snapshots are owned values: cloning a checkpoint never shares actor records
/// with the original, so editing one checkpoint cannot leak into another.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    pub time: f64,
    pub kind: EventKind,
    /// Roster index of the acting actor. `None` for Initial and HorizonReached.
    pub triggerer: Option<usize>,
    pub snapshot: Vec<ActorState>,
}

impl Checkpoint {
    pub fn initial(snapshot: Vec<ActorState>) -> Self {
        Self {
            time: 0.0,
            kind: EventKind::Initial,
            triggerer: None,
            snapshot,
        }
    }

    pub fn action(time: f64, triggerer: usize, snapshot: Vec<ActorState>) -> Self {
        Self {
            time,
            kind: EventKind::Action,
            triggerer: Some(triggerer),
            snapshot,
        }
    }

    pub fn horizon_reached(horizon: f64, snapshot: Vec<ActorState>) -> Self {
        Self {
            time: horizon,
            kind: EventKind::HorizonReached,
            triggerer: None,
            snapshot,
        }
    }

    /// Name of the acting actor, if any.
    pub fn triggerer_name(&self) -> Option<&str> {
        self.triggerer
            .and_then(|index| self.snapshot.get(index))
            .map(ActorState::name)
    }

    #[inline]
    pub fn is_terminal(&self) -> bool {
        self.kind == EventKind::HorizonReached
    }
}
