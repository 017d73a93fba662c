use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;
use tracing::info;

use crate::config::LedgerTimeouts;
use crate::persistence::SqliteRepositoryBase;
use loopstreak_domain::check_in::Streaks;
use loopstreak_domain::habit_loop::{HabitLoop, LoopRepository};
use loopstreak_domain::shared::{DomainError, LoopId, UserId};

#[derive(FromRow)]
struct LoopRow {
    id: String,
    owner_id: String,
    name: String,
    current_streak: i64,
    longest_streak: i64,
    created_at: DateTime<Utc>,
}

impl LoopRow {
    fn try_into_loop(self) -> Result<HabitLoop, DomainError> {
        let current_streak = streak_from_column(self.current_streak, "current_streak")?;
        let longest_streak = streak_from_column(self.longest_streak, "longest_streak")?;

        Ok(HabitLoop::restore(
            LoopId::from_string(&self.id),
            UserId::from_string(&self.owner_id),
            self.name,
            current_streak,
            longest_streak,
            self.created_at,
        ))
    }
}

fn streak_from_column(value: i64, column: &str) -> Result<u32, DomainError> {
    u32::try_from(value)
        .map_err(|_| DomainError::DataIntegrity(format!("Invalid {} value: {}", column, value)))
}

const SELECT_LOOP: &str = r#"
    SELECT id, owner_id, name, current_streak, longest_streak, created_at
    FROM loops
"#;

pub struct SqliteLoopRepository {
    base: SqliteRepositoryBase,
}

impl SqliteLoopRepository {
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
impl LoopRepository for SqliteLoopRepository {
    async fn save(&self, habit_loop: &HabitLoop) -> Result<(), DomainError> {
        let query = r#"
            INSERT INTO loops (id, owner_id, name, current_streak, longest_streak, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                owner_id = ?2,
                name = ?3,
                current_streak = ?4,
                longest_streak = ?5
        "#;

        self.base
            .execute(
                sqlx::query(query)
                    .bind(habit_loop.id().as_str())
                    .bind(habit_loop.owner_id().as_str())
                    .bind(habit_loop.name())
                    .bind(i64::from(habit_loop.current_streak()))
                    .bind(i64::from(habit_loop.longest_streak()))
                    .bind(habit_loop.created_at()),
                "Save loop",
            )
            .await?;

        Ok(())
    }

    async fn find_by_id(&self, id: &LoopId) -> Result<Option<HabitLoop>, DomainError> {
        let query = format!("{} WHERE id = ?1", SELECT_LOOP);

        let row: Option<LoopRow> = self
            .base
            .fetch_optional(sqlx::query_as(&query).bind(id.as_str()), "Find loop by ID")
            .await?;

        row.map(|r| r.try_into_loop()).transpose()
    }

    async fn find_owned(
        &self,
        id: &LoopId,
        owner_id: &UserId,
    ) -> Result<Option<HabitLoop>, DomainError> {
        let query = format!("{} WHERE id = ?1 AND owner_id = ?2", SELECT_LOOP);

        let row: Option<LoopRow> = self
            .base
            .fetch_optional(
                sqlx::query_as(&query)
                    .bind(id.as_str())
                    .bind(owner_id.as_str()),
                "Find loop by ID and owner",
            )
            .await?;

        row.map(|r| r.try_into_loop()).transpose()
    }

    async fn update_streak_fields(
        &self,
        id: &LoopId,
        streaks: Streaks,
    ) -> Result<(), DomainError> {
        let query = r#"
            UPDATE loops
            SET current_streak = ?2, longest_streak = ?3
            WHERE id = ?1
        "#;

        let result = self
            .base
            .execute(
                sqlx::query(query)
                    .bind(id.as_str())
                    .bind(i64::from(streaks.current_streak))
                    .bind(i64::from(streaks.longest_streak)),
                "Update loop streaks",
            )
            .await?;

        if result.rows_affected() == 0 {
            return Err(DomainError::LoopNotFound(id.to_string()));
        }

        info!(
            loop_id = %id,
            current_streak = streaks.current_streak,
            longest_streak = streaks.longest_streak,
            "loop streaks updated"
        );

        Ok(())
    }
}
