//! File-based LedgerRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::{RepositoryError, Result};
use super::traits::LedgerRepository;
use super::types::LedgerSnapshot;

/// File-based implementation of LedgerRepository.
///
/// Each session is one pretty-printed JSON file. Writes go to a temp file
/// first and are moved into place with a rename, so a crash mid-save leaves
/// the previous snapshot intact.
pub struct FileLedgerRepository {
    base_dir: PathBuf,
}

impl FileLedgerRepository {
    /// Create a new file-based ledger repository.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to a session's ledger file.
    fn ledger_path(&self, session_id: &str) -> PathBuf {
        self.base_dir.join(format!("ledger_{}.json", session_id))
    }
}

impl LedgerRepository for FileLedgerRepository {
    fn save(&self, snapshot: &LedgerSnapshot) -> Result<()> {
        let path = self.ledger_path(&snapshot.session_id);
        let temp_path = path.with_extension("json.tmp");

        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, json)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved ledger: {}", path.display());

        Ok(())
    }

    fn load(&self, session_id: &str) -> Result<Option<LedgerSnapshot>> {
        let path = self.ledger_path(session_id);

        if !path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&path)?;
        let snapshot: LedgerSnapshot =
            serde_json::from_str(&json).map_err(|e| RepositoryError::Json(e.to_string()))?;
        snapshot.verify()?;

        tracing::info!(
            "Loaded ledger for session '{}' with {} checkpoints",
            snapshot.session_id,
            snapshot.ledger.len()
        );

        Ok(Some(snapshot))
    }

    fn delete(&self, session_id: &str) -> Result<()> {
        let path = self.ledger_path(session_id);

        if path.exists() {
            fs::remove_file(&path)?;
            tracing::info!("Deleted ledger: {}", path.display());
        }

        Ok(())
    }

    fn list_sessions(&self) -> Result<Vec<String>> {
        let mut sessions = Vec::new();

        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();

            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(session_id) = filename
                    .strip_prefix("ledger_")
                    .and_then(|s| s.strip_suffix(".json"))
            {
                sessions.push(session_id.to_string());
            }
        }

        sessions.sort();
        Ok(sessions)
    }

    fn exists(&self, session_id: &str) -> Result<bool> {
        Ok(self.ledger_path(session_id).exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use turnline_core::{ActorSpec, Edit, HistoryLedger};

    fn sample_snapshot(session_id: &str) -> LedgerSnapshot {
        let actors = [ActorSpec::new("A", 100.0), ActorSpec::new("B", 50.0)];
        let mut ledger = HistoryLedger::initialize(&actors, 300.0).unwrap();
        ledger
            .apply_edit_and_recompute(Edit::delta_speed(1, 1, 12.5))
            .unwrap();
        LedgerSnapshot::new(session_id, ledger)
    }

    #[test]
    fn save_then_load_returns_same_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLedgerRepository::new(dir.path()).unwrap();
        let snapshot = sample_snapshot("s1").with_label("after edit");

        repo.save(&snapshot).unwrap();
        let loaded = repo.load("s1").unwrap().unwrap();

        assert_eq!(loaded, snapshot);
        assert!(!dir.path().join("ledger_s1.json.tmp").exists());
    }

    #[test]
    fn missing_session_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLedgerRepository::new(dir.path()).unwrap();

        assert!(repo.load("nope").unwrap().is_none());
        assert!(!repo.exists("nope").unwrap());
    }

    #[test]
    fn lists_and_deletes_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLedgerRepository::new(dir.path()).unwrap();
        repo.save(&sample_snapshot("b")).unwrap();
        repo.save(&sample_snapshot("a")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        assert_eq!(repo.list_sessions().unwrap(), vec!["a", "b"]);

        repo.delete("a").unwrap();
        assert_eq!(repo.list_sessions().unwrap(), vec!["b"]);
    }

    #[test]
    fn corrupted_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileLedgerRepository::new(dir.path()).unwrap();
        fs::write(dir.path().join("ledger_bad.json"), "{ not json").unwrap();

        assert!(matches!(repo.load("bad"), Err(RepositoryError::Json(_))));
    }
}
