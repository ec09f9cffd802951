//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from the ledger and from repositories so clients can bubble
//! them up with consistent context.

use thiserror::Error;

use turnline_core::LedgerError;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("export failed: {0}")]
    Export(#[source] std::io::Error),
}
