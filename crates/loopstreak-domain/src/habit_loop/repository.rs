use async_trait::async_trait;

use super::HabitLoop;
use crate::check_in::Streaks;
use crate::shared::{DomainError, LoopId, UserId};

#[async_trait]
pub trait LoopRepository: Send + Sync {
    async fn save(&self, habit_loop: &HabitLoop) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &LoopId) -> Result<Option<HabitLoop>, DomainError>;

    /// Find a loop only if `owner_id` owns it.
    async fn find_owned(
        &self,
        id: &LoopId,
        owner_id: &UserId,
    ) -> Result<Option<HabitLoop>, DomainError>;

    /// Persist recomputed streak fields onto the loop record.
    async fn update_streak_fields(
        &self,
        id: &LoopId,
        streaks: Streaks,
    ) -> Result<(), DomainError>;
}
