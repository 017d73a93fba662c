use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, SqlitePool};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

use crate::config::LedgerTimeouts;
use crate::persistence::SqliteRepositoryBase;
use loopstreak_domain::check_in::{CheckIn, CheckInRepository, CheckInStatus, Day, DAY_FORMAT};
use loopstreak_domain::shared::{CheckInId, DomainError, LoopId, UserId};

#[derive(FromRow)]
struct CheckInRow {
    id: String,
    loop_id: String,
    user_id: String,
    day: String,
    status: String,
    created_at: DateTime<Utc>,
}

impl CheckInRow {
    fn try_into_check_in(self) -> Result<CheckIn, DomainError> {
        Ok(CheckIn::restore(
            CheckInId::from_string(&self.id),
            LoopId::from_string(&self.loop_id),
            UserId::from_string(&self.user_id),
            parse_stored_day(&self.day)?,
            self.status.parse::<CheckInStatus>()?,
            self.created_at,
        ))
    }
}

fn parse_stored_day(value: &str) -> Result<Day, DomainError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map(Day::from_date)
        .map_err(|e| DomainError::DataIntegrity(format!("Invalid stored day: {} ({})", value, e)))
}

pub struct SqliteCheckInRepository {
    base: SqliteRepositoryBase,
}

impl SqliteCheckInRepository {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self {
            base: SqliteRepositoryBase::new(pool),
        }
    }

    pub fn with_timeouts(pool: Arc<SqlitePool>, timeouts: LedgerTimeouts) -> Self {
        Self {
            base: SqliteRepositoryBase::with_timeouts(pool, timeouts),
        }
    }
}

#[async_trait]
impl CheckInRepository for SqliteCheckInRepository {
    async fn find(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        day: Day,
    ) -> Result<Option<CheckIn>, DomainError> {
        let query = r#"
            SELECT id, loop_id, user_id, day, status, created_at
            FROM check_ins
            WHERE loop_id = ?1 AND user_id = ?2 AND day = ?3
            LIMIT 1
        "#;

        let row: Option<CheckInRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(loop_id.as_str())
                    .bind(user_id.as_str())
                    .bind(day.to_string()),
                "Find check-in",
            )
            .await?;

        row.map(|r| r.try_into_check_in()).transpose()
    }

    async fn insert(&self, check_in: &CheckIn) -> Result<(), DomainError> {
        // Plain INSERT: a duplicate (loop, user, day) must surface as a conflict.
        let query = r#"
            INSERT INTO check_ins (id, loop_id, user_id, day, status, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(check_in.id().as_str())
                    .bind(check_in.loop_id().as_str())
                    .bind(check_in.user_id().as_str())
                    .bind(check_in.day().to_string())
                    .bind(check_in.status().as_str())
                    .bind(check_in.created_at()),
                "Insert check-in",
            )
            .await?;

        debug!(
            check_in_id = %check_in.id(),
            loop_id = %check_in.loop_id(),
            day = %check_in.day(),
            "check-in inserted"
        );

        Ok(())
    }

    async fn list_days(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
    ) -> Result<BTreeSet<Day>, DomainError> {
        let query = r#"
            SELECT day
            FROM check_ins
            WHERE loop_id = ?1 AND user_id = ?2
            ORDER BY day ASC
        "#;

        let rows: Vec<(String,)> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(loop_id.as_str())
                    .bind(user_id.as_str()),
                "List check-in days",
            )
            .await?;

        rows.iter().map(|(day,)| parse_stored_day(day)).collect()
    }

    async fn list_by_loop(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
    ) -> Result<Vec<CheckIn>, DomainError> {
        let query = r#"
            SELECT id, loop_id, user_id, day, status, created_at
            FROM check_ins
            WHERE loop_id = ?1 AND user_id = ?2
            ORDER BY day DESC
        "#;

        let rows: Vec<CheckInRow> = self
            .base
            .fetch_all(
                sqlx::query_as(query)
                    .bind(loop_id.as_str())
                    .bind(user_id.as_str()),
                "List check-ins by loop",
            )
            .await?;

        rows.into_iter().map(|r| r.try_into_check_in()).collect()
    }

    async fn exists(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        day: Day,
    ) -> Result<bool, DomainError> {
        let query = r#"
            SELECT COUNT(*)
            FROM check_ins
            WHERE loop_id = ?1 AND user_id = ?2 AND day = ?3
        "#;

        let row: Option<(i64,)> = self
            .base
            .fetch_optional(
                sqlx::query_as(query)
                    .bind(loop_id.as_str())
                    .bind(user_id.as_str())
                    .bind(day.to_string()),
                "Check-in exists",
            )
            .await?;

        Ok(row.is_some_and(|(count,)| count > 0))
    }
}
