//! Ledger session orchestration.
//!
//! A [`Session`] owns one [`HistoryLedger`] and, optionally, the repository it
//! is saved to. Every successful change is persisted immediately; a failed
//! change leaves both the in-memory ledger and the stored copy untouched.

use std::path::Path;

use turnline_core::{ActorSpec, Edit, EditOutcome, HistoryLedger, SimError};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::export;
use crate::repository::{LedgerRepository, LedgerSnapshot};
use crate::table::{TableRow, table_rows};
use crate::types::{SessionId, generate_session_id};

/// One roster, its ledger, and where it is saved.
pub struct Session {
    id: SessionId,
    ledger: HistoryLedger,
    repository: Option<Box<dyn LedgerRepository>>,
}

impl Session {
    /// Create a new session builder
    pub fn builder(config: RuntimeConfig) -> SessionBuilder {
        SessionBuilder::new(config)
    }

    /// Restores a saved session.
    pub fn resume(repository: impl LedgerRepository + 'static, session_id: &str) -> Result<Self> {
        let snapshot = repository
            .load(session_id)?
            .ok_or_else(|| RuntimeError::SessionNotFound(session_id.to_string()))?;

        tracing::info!(
            session = %snapshot.session_id,
            checkpoints = snapshot.ledger.len(),
            "resumed session"
        );

        Ok(Self {
            id: snapshot.session_id,
            ledger: snapshot.ledger,
            repository: Some(Box::new(repository)),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn is_persistent(&self) -> bool {
        self.repository.is_some()
    }

    /// Drops the repository; later changes stay in memory only.
    pub fn detached(mut self) -> Self {
        self.repository = None;
        self
    }

    /// Applies a retroactive edit and saves the recomputed ledger.
    ///
    /// A distance advisory is logged as a warning; the edit still goes through.
    pub fn edit(&mut self, edit: Edit) -> Result<EditOutcome> {
        let mut ledger = self.ledger.clone();
        let outcome = match ledger.apply_edit_and_recompute(edit) {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::warn!(
                    session = %self.id,
                    code = err.error_code(),
                    severity = err.severity().as_str(),
                    "edit rejected: {err}"
                );
                return Err(err.into());
            }
        };

        if let Some(advisory) = &outcome.advisory {
            tracing::warn!(
                session = %self.id,
                checkpoint = edit.checkpoint,
                actor = edit.actor,
                remaining = advisory.unclamped_remaining(),
                "distance edit drives remaining distance below zero"
            );
        }

        tracing::debug!(
            session = %self.id,
            checkpoint = edit.checkpoint,
            field = %edit.field,
            value = edit.value,
            discarded = outcome.discarded,
            appended = outcome.appended,
            "recomputed ledger suffix"
        );

        self.persist(&ledger)?;
        self.ledger = ledger;
        Ok(outcome)
    }

    /// Writes the current ledger to the repository, if one is attached.
    pub fn save(&self) -> Result<()> {
        self.persist(&self.ledger)
    }

    fn persist(&self, ledger: &HistoryLedger) -> Result<()> {
        if let Some(repository) = &self.repository {
            repository.save(&LedgerSnapshot::new(self.id.clone(), ledger.clone()))?;
        }
        Ok(())
    }

    pub fn table(&self) -> Vec<TableRow> {
        table_rows(&self.ledger)
    }

    /// Exports the ledger as delimited text.
    pub fn export_to(&self, path: &Path, delimiter: char) -> Result<()> {
        export::export_to_file(&self.ledger, path, delimiter).map_err(RuntimeError::Export)
    }
}

/// Builder for [`Session`].
pub struct SessionBuilder {
    config: RuntimeConfig,
    session_id: Option<SessionId>,
    repository: Option<Box<dyn LedgerRepository>>,
}

impl SessionBuilder {
    fn new(config: RuntimeConfig) -> Self {
        let session_id = config.session_id.clone();
        Self {
            config,
            session_id,
            repository: None,
        }
    }

    /// Override the session id (default: config value, else generated)
    pub fn session_id(mut self, session_id: impl Into<SessionId>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Save the ledger to `repository` after every change
    pub fn repository(mut self, repository: impl LedgerRepository + 'static) -> Self {
        self.repository = Some(Box::new(repository));
        self
    }

    /// Simulates `actors` up to the configured horizon and saves the result.
    pub fn start(self, actors: &[ActorSpec]) -> Result<Session> {
        let ledger = HistoryLedger::initialize_with_config(
            actors,
            self.config.horizon,
            self.config.sim.clone(),
        )?;

        let session = Session {
            id: self.session_id.unwrap_or_else(generate_session_id),
            ledger,
            repository: self.repository,
        };

        tracing::info!(
            session = %session.id,
            actors = actors.len(),
            horizon = session.ledger.horizon(),
            actions = session.ledger.action_count(),
            "started session"
        );

        session.save()?;
        Ok(session)
    }
}
