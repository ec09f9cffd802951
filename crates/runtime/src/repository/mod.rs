//! Repository layer for ledger persistence.
//!
//! A ledger is stored as one flat [`LedgerSnapshot`] per session. Repositories
//! never interpret the checkpoints; they round-trip them verbatim and check the
//! ledger invariants on load.

mod error;
mod file;
mod memory;
mod traits;
mod types;

pub use error::RepositoryError;
pub use file::FileLedgerRepository;
pub use memory::InMemoryLedgerRepository;
pub use traits::LedgerRepository;
pub use types::LedgerSnapshot;
