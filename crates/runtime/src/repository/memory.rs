//! In-memory ledger repository implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use super::error::{RepositoryError, Result};
use super::traits::LedgerRepository;
use super::types::LedgerSnapshot;

/// In-memory ledger repository for testing and development.
///
/// Thread-safe but not persistent across process restarts.
pub struct InMemoryLedgerRepository {
    ledgers: RwLock<HashMap<String, LedgerSnapshot>>,
}

impl InMemoryLedgerRepository {
    /// Create a new empty in-memory ledger repository.
    pub fn new() -> Self {
        Self {
            ledgers: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerRepository for InMemoryLedgerRepository {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let mut ledgers = self
            .ledgers
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        ledgers.insert(snapshot.session_id.clone(), snapshot.clone());
        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<LedgerSnapshot>> {
        let ledgers = self
            .ledgers
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        Ok(ledgers.get(session_id).cloned())
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let mut ledgers = self
            .ledgers
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        ledgers.remove(session_id);
        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let ledgers = self
            .ledgers
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;

        let mut sessions: Vec<String> = ledgers.keys().cloned().collect();
        sessions.sort();
        Ok(sessions)
    }
}
