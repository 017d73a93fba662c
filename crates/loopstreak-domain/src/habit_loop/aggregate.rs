use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::check_in::Streaks;
use crate::shared::{DomainError, LoopId, UserId};

/// A user defined habit tracked once per calendar day.
///
/// The streak fields are derived from the check-in history and only change
/// through [`HabitLoop::apply_streaks`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitLoop {
    id: LoopId,
    owner_id: UserId,
    name: String,
    current_streak: u32,
    longest_streak: u32,
    created_at: DateTime<Utc>,
}

impl HabitLoop {
    pub fn new(
        owner_id: UserId,
        name: String,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::Validation(
                "Loop name cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            id: LoopId::new(),
            owner_id,
            name: name.trim().to_string(),
            current_streak: 0,
            longest_streak: 0,
            created_at,
        })
    }

    pub fn restore(
        id: LoopId,
        owner_id: UserId,
        name: String,
        current_streak: u32,
        longest_streak: u32,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            current_streak,
            longest_streak,
            created_at,
        }
    }

    pub fn id(&self) -> &LoopId {
        &self.id
    }

    pub fn owner_id(&self) -> &UserId {
        &self.owner_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_streak(&self) -> u32 {
        self.current_streak
    }

    pub fn longest_streak(&self) -> u32 {
        self.longest_streak
    }

    pub fn streaks(&self) -> Streaks {
        Streaks::new(self.current_streak, self.longest_streak)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.owner_id == user_id
    }

    /// Overwrite the derived fields with a fresh recomputation.
    pub fn apply_streaks(&mut self, streaks: Streaks) {
        self.current_streak = streaks.current_streak;
        self.longest_streak = streaks.longest_streak;
    }
}
