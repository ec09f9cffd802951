//! Ledger errors.
//!
//! Variants fall into three families: invalid parameters (construction or
//! edit input), out-of-range references, and simulation divergence.

use crate::actor::ActorError;
use crate::engine::EngineError;
use crate::error::{ErrorSeverity, SimError};

/// Errors returned by [`HistoryLedger`](super::HistoryLedger) operations.
///
/// A failed call never leaves the ledger partially modified.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LedgerError {
    #[error("invalid actor parameter: {0}")]
    InvalidActor(#[from] ActorError),

    #[error("horizon must be a positive number (got {0})")]
    InvalidHorizon(f64),

    #[error("action distance must be a positive number (got {0})")]
    InvalidActionDistance(f64),

    #[error("roster must contain at least one actor")]
    EmptyRoster,

    #[error("checkpoint index {index} out of range (ledger has {len} checkpoints)")]
    CheckpointOutOfRange { index: usize, len: usize },

    #[error("actor index {index} out of range (roster has {len} actors)")]
    ActorOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("ledger invariant violated at checkpoint {index}: {reason}")]
    InvariantViolation { index: usize, reason: &'static str },
}

impl LedgerError {
    /// Bad construction or edit input.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            Self::InvalidActor(_)
                | Self::InvalidHorizon(_)
                | Self::InvalidActionDistance(_)
                | Self::EmptyRoster
                | Self::Engine(EngineError::InvalidWindow { .. })
        )
    }

    /// Reference to a checkpoint or actor the ledger does not contain.
    pub fn is_out_of_range(&self) -> bool {
        matches!(
            self,
            Self::CheckpointOutOfRange { .. } | Self::ActorOutOfRange { .. }
        )
    }

    /// The engine exceeded its step cap.
    pub fn is_divergence(&self) -> bool {
        matches!(self, Self::Engine(EngineError::SimulationDivergence { .. }))
    }
}

impl SimError for LedgerError {
    fn severity(&self) -> ErrorSeverity {
        use LedgerError::*;
        match self {
            InvalidActor(err) => err.severity(),
            Engine(err) => err.severity(),
            InvalidHorizon(_)
            | InvalidActionDistance(_)
            | EmptyRoster
            | CheckpointOutOfRange { .. }
            | ActorOutOfRange { .. } => ErrorSeverity::Validation,
            InvariantViolation { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use LedgerError::*;
        match self {
            InvalidActor(err) => err.error_code(),
            Engine(err) => err.error_code(),
            InvalidHorizon(_) => "LEDGER_INVALID_HORIZON",
            InvalidActionDistance(_) => "LEDGER_INVALID_ACTION_DISTANCE",
            EmptyRoster => "LEDGER_EMPTY_ROSTER",
            CheckpointOutOfRange { .. } => "LEDGER_CHECKPOINT_OUT_OF_RANGE",
            ActorOutOfRange { .. } => "LEDGER_ACTOR_OUT_OF_RANGE",
            InvariantViolation { .. } => "LEDGER_INVARIANT_VIOLATION",
        }
    }
}
