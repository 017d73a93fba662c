use loopstreak_domain::shared::DomainError;
use sqlx::query::{Query, QueryAs};
use sqlx::sqlite::{SqliteArguments, SqliteQueryResult, SqliteRow};
use sqlx::{FromRow, Sqlite, SqlitePool};
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

use crate::config::LedgerTimeouts;

/// Shared query plumbing for the SQLite repositories: every statement runs
/// under the query timeout and errors are mapped onto [`DomainError`].
#[derive(Clone)]
pub struct SqliteRepositoryBase {
    pool: Arc<SqlitePool>,
    timeouts: LedgerTimeouts,
}

impl SqliteRepositoryBase {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self::with_timeouts(pool, LedgerTimeouts::default())
    }

    pub fn with_timeouts(pool: Arc<SqlitePool>, timeouts: LedgerTimeouts) -> Self {
        Self { pool, timeouts }
    }

    pub async fn execute<'q>(
        &self,
        query: Query<'q, Sqlite, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<SqliteQueryResult, DomainError> {
        self.run(query.execute(&*self.pool), context).await
    }

    pub async fn fetch_optional<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Option<O>, DomainError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        self.run(query.fetch_optional(&*self.pool), context)
            .await
    }

    pub async fn fetch_all<'q, O>(
        &self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
        context: &str,
    ) -> Result<Vec<O>, DomainError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, SqliteRow>,
    {
        self.run(query.fetch_all(&*self.pool), context).await
    }

    async fn run<T, F>(&self, fut: F, context: &str) -> Result<T, DomainError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        match tokio::time::timeout(self.timeouts.db_query, fut).await {
            Ok(result) => result.map_err(|e| map_sqlx_error(e, context)),
            Err(_) => {
                warn!(
                    context,
                    timeout_ms = self.timeouts.db_query.as_millis() as u64,
                    "database query timed out"
                );
                Err(DomainError::Timeout(format!(
                    "{} exceeded {}ms",
                    context,
                    self.timeouts.db_query.as_millis()
                )))
            }
        }
    }
}

/// Translate a driver error. Unique violations become [`DomainError::Conflict`]
/// so callers can treat them as "someone else wrote it first".
pub fn map_sqlx_error(err: sqlx::Error, context: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            DomainError::Conflict(format!("{}: {}", context, db_err.message()))
        }
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            DomainError::NotFound(format!("{}: {}", context, db_err.message()))
        }
        sqlx::Error::PoolTimedOut => DomainError::Timeout(format!("{}: {}", context, err)),
        sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            DomainError::Infrastructure(format!("{}: {}", context, err))
        }
        _ => DomainError::Repository(format!("{}: {}", context, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_maps_to_timeout() {
        let err = map_sqlx_error(sqlx::Error::PoolTimedOut, "List check-in days");
        assert!(matches!(err, DomainError::Timeout(ref msg) if msg.starts_with("List check-in days")));
        assert!(err.is_dependency_failure());
    }

    #[test]
    fn test_row_not_found_maps_to_repository() {
        let err = map_sqlx_error(sqlx::Error::RowNotFound, "Find loop");
        assert!(matches!(err, DomainError::Repository(_)));
    }

    #[test]
    fn test_closed_pool_maps_to_infrastructure() {
        let err = map_sqlx_error(sqlx::Error::PoolClosed, "Insert check-in");
        assert!(matches!(err, DomainError::Infrastructure(_)));
    }
}
