//! Helpers shared by the commands.

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use turnline_runtime::{FileLedgerRepository, LedgerRepository, RuntimeConfig, Session};

/// Environment configuration with an optional `--data-dir` override applied.
pub fn runtime_config(data_dir: Option<PathBuf>) -> RuntimeConfig {
    let config = RuntimeConfig::from_env();
    match data_dir {
        Some(dir) => config.with_save_data_dir(dir),
        None => config,
    }
}

/// Opens the file repository under the configured save directory.
pub fn open_repository(config: &RuntimeConfig) -> Result<FileLedgerRepository> {
    let dir = config.resolved_save_dir();
    FileLedgerRepository::new(&dir)
        .with_context(|| format!("Failed to open save directory: {}", dir.display()))
}

/// Resolves `session` or, when absent, the most recently saved session.
pub fn resolve_session(repository: &FileLedgerRepository, session: Option<String>) -> Result<String> {
    if let Some(id) = session {
        return Ok(id);
    }

    find_latest_session(repository)
}

/// Session ids embed their creation time (`session_<secs>`); the largest wins.
/// Ids without a timestamp sort before generated ones.
pub fn find_latest_session(repository: &FileLedgerRepository) -> Result<String> {
    let sessions = repository.list_sessions()?;

    sessions
        .into_iter()
        .max_by_key(|id| {
            let stamp = id
                .strip_prefix("session_")
                .and_then(|secs| secs.parse::<u64>().ok());
            (stamp, id.clone())
        })
        .ok_or_else(|| {
            anyhow!(
                "No saved sessions in {}\nRun `turnline simulate` first.",
                repository.base_dir().display()
            )
        })
}

/// Loads a saved session from the file repository.
///
/// With persistence disabled the session is detached: changes are not saved.
pub fn resume_session(config: &RuntimeConfig, session: Option<String>) -> Result<Session> {
    let repository = open_repository(config)?;
    let id = resolve_session(&repository, session)?;
    let session =
        Session::resume(repository, &id).with_context(|| format!("Failed to load session {id}"))?;

    Ok(if config.enable_persistence {
        session
    } else {
        session.detached()
    })
}
