// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod config;
pub mod logging;
pub mod persistence;

pub use config::{DatabaseOptions, LedgerTimeouts};
pub use persistence::Database;
