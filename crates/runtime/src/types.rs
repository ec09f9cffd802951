//! Common type aliases used throughout the runtime.
//!
//! These type aliases provide semantic clarity for primitive types
//! that are used with specific meanings across the runtime.

/// Session identifier for one roster and its ledger
pub type SessionId = String;

/// Unix timestamp in seconds
pub type Timestamp = u64;

/// Get current unix timestamp in seconds.
///
/// A clock set before the epoch reads as zero.
pub fn current_timestamp() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Generate a session id from the current time (`session_<unix seconds>`).
pub fn generate_session_id() -> SessionId {
    format!("session_{}", current_timestamp())
}
