//! Command implementations for turnline
//!
//! Each command is a separate module that implements its own CLI args and execution logic.

mod edit;
mod export;
mod sessions;
mod show;
mod simulate;

pub use edit::Edit;
pub use export::Export;
pub use sessions::Sessions;
pub use show::Show;
pub use simulate::Simulate;
