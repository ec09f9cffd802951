//! Deterministic action-timeline engine.
//!
//! `turnline-core` computes the order in which a fixed roster of actors act,
//! each advancing toward its next action at its own speed, up to a time
//! horizon. [`HistoryLedger`] records every action as a [`Checkpoint`] and
//! supports retroactive edits: changing an actor's offset at checkpoint *k*
//! re-simulates everything after *k* through [`TurnEngine`].
//!
//! The crate is pure: no I/O, no logging, no wall clock. Persistence, export
//! and presentation live in `turnline-runtime`.
pub mod actor;
pub mod checkpoint;
pub mod config;
pub mod engine;
pub mod error;
pub mod ledger;

pub use actor::{ActorError, ActorSpec, ActorState, DistanceAdvisory};
pub use checkpoint::{Checkpoint, EventKind};
pub use config::{DEFAULT_ROSTER, SimConfig};
pub use engine::{EngineError, TurnEngine};
pub use error::{ErrorSeverity, SimError};
pub use ledger::{Edit, EditField, EditOutcome, HistoryLedger, LedgerError};
