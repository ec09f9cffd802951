//! Common error infrastructure for turnline-core.
//!
//! Domain-specific errors (`ActorError`, `EngineError`, `LedgerError`) live next
//! to the component that raises them. Each implements [`SimError`] so callers
//! can classify failures without matching on every variant.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Validation**: rejected input; the caller may retry with a different value
/// - **Internal**: a ledger that breaks its own invariants; investigate as a bug
/// - **Fatal**: the engine could not reach the horizon; not user-correctable
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input, should not retry without changes.
    ///
    /// Examples: empty actor name, non-positive resulting speed, checkpoint
    /// index past the end of the ledger
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: a restored ledger whose checkpoints break an invariant
    Internal,

    /// The run cannot continue.
    ///
    /// Examples: step cap exceeded while simulating
    Fatal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the caller can fix the failure by changing its input.
    pub const fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation)
    }
}

/// Shared behaviour for every error raised by turnline-core.
pub trait SimError: std::error::Error {
    /// Returns the severity classification of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a stable identifier for this error variant.
    ///
    /// Useful for logs and for frontends mapping errors to messages.
    fn error_code(&self) -> &'static str;
}
