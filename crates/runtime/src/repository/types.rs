//! Persisted ledger representation.

use serde::{Deserialize, Serialize};

use turnline_core::HistoryLedger;

use super::error::{RepositoryError, Result};
use crate::types::{SessionId, Timestamp, current_timestamp};

/// Flat snapshot of one session's ledger.
///
/// # Data Layout
///
/// ```text
/// {save_dir}/ledger_{session}.json  ← this structure, pretty-printed
/// ```
///
/// The ledger is stored verbatim: configuration, horizon and every checkpoint
/// with its full actor snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Session this ledger belongs to
    pub session_id: SessionId,

    /// Unix timestamp of the save
    pub saved_at: Timestamp,

    /// Optional human-readable label ("before speed buff")
    pub label: Option<String>,

    pub ledger: HistoryLedger,
}

impl LedgerSnapshot {
    pub fn new(session_id: impl Into<SessionId>, ledger: HistoryLedger) -> Self {
        Self {
            session_id: session_id.into(),
            saved_at: current_timestamp(),
            label: None,
            ledger,
        }
    }

    /// Set human-readable label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Rejects snapshots whose ledger breaks the checkpoint invariants.
    pub fn verify(&self) -> Result<()> {
        self.ledger.validate().map_err(|err| {
            RepositoryError::CorruptedData(format!("session '{}': {}", self.session_id, err))
        })
    }
}
