use loopstreak_domain::shared::DomainError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use tracing::info;

use crate::config::{DatabaseOptions, LedgerTimeouts};

pub struct Database {
    pool: SqlitePool,
    timeouts: LedgerTimeouts,
}

impl Database {
    /// Open (creating if needed) the database file at `db_path`.
    pub async fn new(db_path: &str, options: DatabaseOptions) -> Result<Self, DomainError> {
        let path = Path::new(db_path);

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                DomainError::Infrastructure(format!("Failed to create DB directory: {}", e))
            })?;
        }

        let connect_options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(options.max_connections)
            .acquire_timeout(options.timeouts.db_acquire)
            .connect_with(connect_options)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        info!(db_path, max_connections = options.max_connections, "database opened");

        Ok(Self {
            pool,
            timeouts: options.timeouts,
        })
    }

    /// Private in-memory database. A single connection keeps every query on
    /// the same memory database.
    pub async fn in_memory() -> Result<Self, DomainError> {
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(connect_options)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;

        Ok(Self {
            pool,
            timeouts: LedgerTimeouts::default(),
        })
    }

    pub async fn run_migrations(&self) -> Result<(), DomainError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn timeouts(&self) -> LedgerTimeouts {
        self.timeouts
    }
}
