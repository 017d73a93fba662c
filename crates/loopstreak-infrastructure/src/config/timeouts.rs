use std::time::Duration;

/// Timeouts applied to ledger and loop store calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerTimeouts {
    /// Upper bound for a single query
    pub db_query: Duration,

    /// Upper bound for acquiring a pooled connection
    pub db_acquire: Duration,
}

impl Default for LedgerTimeouts {
    fn default() -> Self {
        Self {
            db_query: Duration::from_secs(10),
            db_acquire: Duration::from_secs(30),
        }
    }
}

impl LedgerTimeouts {
    pub fn with_query_timeout(mut self, db_query: Duration) -> Self {
        self.db_query = db_query;
        self
    }
}

/// Pool settings for [`crate::persistence::Database`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatabaseOptions {
    pub max_connections: u32,
    pub timeouts: LedgerTimeouts,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            max_connections: 5,
            timeouts: LedgerTimeouts::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = DatabaseOptions::default();
        assert_eq!(options.max_connections, 5);
        assert_eq!(options.timeouts.db_query, Duration::from_secs(10));
    }

    #[test]
    fn test_with_query_timeout() {
        let timeouts = LedgerTimeouts::default().with_query_timeout(Duration::from_millis(250));
        assert_eq!(timeouts.db_query, Duration::from_millis(250));
        assert_eq!(timeouts.db_acquire, Duration::from_secs(30));
    }
}
