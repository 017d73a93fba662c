use std::sync::Arc;
use tracing::info;

use crate::application::dtos::{CheckInDto, StreakStatsDto};
use loopstreak_domain::check_in::{CheckInRepository, Day, StreakCalculator};
use loopstreak_domain::habit_loop::{HabitLoop, LoopRepository};
use loopstreak_domain::shared::{Clock, DomainError, LoopId, SystemClock, UserId};

/// Read side of the check-in ledger. Never writes.
pub struct CheckInQueries {
    loop_repo: Arc<dyn LoopRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
}

impl CheckInQueries {
    pub fn new(
        loop_repo: Arc<dyn LoopRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
    ) -> Self {
        Self {
            loop_repo,
            check_in_repo,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// All check-ins of the user's loop, newest first.
    pub async fn list_check_ins(
        &self,
        loop_id: &str,
        user_id: &str,
    ) -> Result<Vec<CheckInDto>, DomainError> {
        let (loop_id, user_id) = (LoopId::from_string(loop_id), UserId::from_string(user_id));
        self.find_owned_loop(&loop_id, &user_id).await?;

        let check_ins = self.check_in_repo.list_by_loop(&loop_id, &user_id).await?;

        info!(loop_id = %loop_id, total = check_ins.len(), "[streak] list_check_ins");
        Ok(check_ins.iter().map(CheckInDto::from).collect())
    }

    /// Streak statistics as of `reference_date` (defaults to today).
    pub async fn get_streak_stats(
        &self,
        loop_id: &str,
        user_id: &str,
        reference_date: Option<&str>,
    ) -> Result<StreakStatsDto, DomainError> {
        let reference_day = Day::resolve(reference_date, self.clock.now())?;
        let (loop_id, user_id) = (LoopId::from_string(loop_id), UserId::from_string(user_id));
        let habit = self.find_owned_loop(&loop_id, &user_id).await?;

        let days = self.check_in_repo.list_days(&loop_id, &user_id).await?;
        let summary = StreakCalculator::summarize(&days, reference_day);
        let dto = StreakStatsDto::new(&habit, &summary);

        info!(
            loop_id = %loop_id,
            current = dto.current_streak,
            longest = dto.longest_streak,
            total = dto.total_check_in_days,
            "[streak] get_streak_stats"
        );

        Ok(dto)
    }

    async fn find_owned_loop(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
    ) -> Result<HabitLoop, DomainError> {
        self.loop_repo
            .find_owned(loop_id, user_id)
            .await?
            .ok_or_else(|| {
                DomainError::LoopNotFound(format!(
                    "Loop {} not found or not owned by {}",
                    loop_id, user_id
                ))
            })
    }
}
