//! Runtime services around the turnline engine.
//!
//! This crate wraps [`turnline_core::HistoryLedger`] with everything the pure
//! engine leaves out: sessions, persistence, tabular views and export.
//!
//! Modules are organized by responsibility:
//! - [`session`] owns a ledger and saves it after every change
//! - [`repository`] stores ledgers as flat JSON snapshots
//! - [`table`] and [`export`] render checkpoints for frontends
//! - [`config`] loads runtime settings from the environment
pub mod config;
pub mod error;
pub mod export;
pub mod repository;
pub mod session;
pub mod table;
pub mod types;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use export::{export_delimited, export_to_file};
pub use repository::{
    FileLedgerRepository, InMemoryLedgerRepository, LedgerRepository, LedgerSnapshot,
    RepositoryError,
};
pub use session::{Session, SessionBuilder};
pub use table::{ActorColumns, TableRow, table_rows};
pub use types::{SessionId, Timestamp};
