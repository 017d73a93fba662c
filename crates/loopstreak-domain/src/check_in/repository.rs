use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::debug;

use super::{CheckIn, Day, UpsertOutcome};
use crate::shared::{DomainError, LoopId, UserId};

/// Durable ledger of check-ins, one record per `(loop, user, day)`.
#[async_trait]
pub trait CheckInRepository: Send + Sync {
    async fn find(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        day: Day,
    ) -> Result<Option<CheckIn>, DomainError>;

    /// Persist a new record.
    ///
    /// Implementations must fail with [`DomainError::Conflict`] when a record
    /// for the same `(loop, user, day)` already exists.
    async fn insert(&self, check_in: &CheckIn) -> Result<(), DomainError>;

    /// Every day the user checked the loop in.
    async fn list_days(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
    ) -> Result<BTreeSet<Day>, DomainError>;

    /// All records for the pair, newest day first.
    async fn list_by_loop(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
    ) -> Result<Vec<CheckIn>, DomainError>;

    async fn exists(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        day: Day,
    ) -> Result<bool, DomainError> {
        Ok(self.find(loop_id, user_id, day).await?.is_some())
    }

    /// Return the record for the day, creating it with status `done` if absent.
    ///
    /// A duplicate-key failure from [`insert`](Self::insert) means another
    /// writer got there first; the stored record is fetched and returned as
    /// if it had been found up front.
    async fn upsert(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        day: Day,
        now: DateTime<Utc>,
    ) -> Result<UpsertOutcome, DomainError> {
        if let Some(existing) = self.find(loop_id, user_id, day).await? {
            return Ok(UpsertOutcome {
                check_in: existing,
                created: false,
            });
        }

        let check_in = CheckIn::new(loop_id.clone(), user_id.clone(), day, now);
        match self.insert(&check_in).await {
            Ok(()) => Ok(UpsertOutcome {
                check_in,
                created: true,
            }),
            Err(e) if e.is_conflict() => {
                debug!(
                    loop_id = %loop_id,
                    user_id = %user_id,
                    day = %day,
                    "lost check-in insert race, returning stored record"
                );
                let stored = self.find(loop_id, user_id, day).await?.ok_or_else(|| {
                    DomainError::DataIntegrity(format!(
                        "Check-in for loop {} on {} conflicted but is missing",
                        loop_id, day
                    ))
                })?;
                Ok(UpsertOutcome {
                    check_in: stored,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }
}
