mod timeouts;

pub use timeouts::{DatabaseOptions, LedgerTimeouts};
