use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::day::Day;
use super::value_objects::CheckInStatus;
use crate::shared::{CheckInId, LoopId, UserId};

/// One completion of a loop by a user on a calendar day.
///
/// Identified by `(loop_id, user_id, day)`; the ledger keeps at most one record
/// per triple and never mutates it after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckIn {
    id: CheckInId,
    loop_id: LoopId,
    user_id: UserId,
    day: Day,
    status: CheckInStatus,
    created_at: DateTime<Utc>,
}

impl CheckIn {
    pub fn new(loop_id: LoopId, user_id: UserId, day: Day, created_at: DateTime<Utc>) -> Self {
        Self {
            id: CheckInId::new(),
            loop_id,
            user_id,
            day,
            status: CheckInStatus::Done,
            created_at,
        }
    }

    pub fn restore(
        id: CheckInId,
        loop_id: LoopId,
        user_id: UserId,
        day: Day,
        status: CheckInStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            loop_id,
            user_id,
            day,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> &CheckInId {
        &self.id
    }

    pub fn loop_id(&self) -> &LoopId {
        &self.loop_id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn day(&self) -> Day {
        self.day
    }

    pub fn status(&self) -> CheckInStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
