//! Repository contract for saving and loading ledgers.

use super::error::Result;
use super::types::LedgerSnapshot;

/// Repository for ledger persistence, keyed by session id.
///
/// `save` replaces any previous snapshot of the same session; there is no
/// history of saves.
pub trait LedgerRepository: Send + Sync {
    /// Save a snapshot, overwriting the session's previous one
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()>;

    /// Load the snapshot of a session
    fn load(&self, session_id: &str) -> Result<Option<LedgerSnapshot>>;

    /// Delete the snapshot of a session
    fn delete(&self, session_id: &str) -> Result<()>;

    /// List all stored sessions, sorted
    fn list_sessions(&self) -> Result<Vec<String>>;

    /// Check if a session has a stored snapshot
    fn exists(&self, session_id: &str) -> Result<bool> {
        Ok(self.load(session_id)?.is_some())
    }
}

/// Shared repositories: sessions and callers can hold the same store.
impl<R: LedgerRepository + ?Sized> LedgerRepository for std::sync::Arc<R> {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        (**self).save(snapshot)
    }

    fn load(&self, session_id: &str) -> Result<Option<LedgerSnapshot>> {
        (**self).load(session_id)
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        (**self).delete(session_id)
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        (**self).list_sessions()
    }

    fn exists(&self, session_id: &str) -> Result<bool> {
        (**self).exists(session_id)
    }
}
