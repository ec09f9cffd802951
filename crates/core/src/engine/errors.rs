//! Error types for the stepping engine.

use crate::error::{ErrorSeverity, SimError};

/// Errors surfaced while simulating a roster toward the horizon.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error("simulation window must be finite (start {start_time}, horizon {horizon})")]
    InvalidWindow { start_time: f64, horizon: f64 },

    #[error(
        "simulation diverged: {max_steps} steps committed at clock {clock} without reaching horizon {horizon}"
    )]
    SimulationDivergence {
        max_steps: usize,
        clock: f64,
        horizon: f64,
    },
}

impl SimError for EngineError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EngineError::InvalidWindow { .. } => ErrorSeverity::Validation,
            EngineError::SimulationDivergence { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EngineError::InvalidWindow { .. } => "ENGINE_INVALID_WINDOW",
            EngineError::SimulationDivergence { .. } => "ENGINE_SIMULATION_DIVERGENCE",
        }
    }
}
