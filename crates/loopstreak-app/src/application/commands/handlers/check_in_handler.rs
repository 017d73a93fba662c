use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::application::commands::check_in_commands::*;
use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::loop_locks::LoopLocks;
use crate::application::dtos::CheckInDto;
use loopstreak_domain::check_in::{CheckInRepository, Day, StreakCalculator, Streaks};
use loopstreak_domain::habit_loop::LoopRepository;
use loopstreak_domain::shared::{Clock, DomainError, LoopId, SystemClock, UserId};

/// Idempotent daily check-in.
///
/// The first check-in of a day writes one record and one loop update. Repeats
/// for the same day, including the loser of a concurrent insert race, write
/// nothing and report the streaks derived from the stored history.
///
/// Check-ins for the same loop run one at a time from the ledger write to the
/// loop update, so the stored streak fields always reflect the latest history.
pub struct CheckInCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    check_in_repo: Arc<dyn CheckInRepository>,
    clock: Arc<dyn Clock>,
    loop_locks: LoopLocks,
}

impl CheckInCommandHandler {
    pub fn new(
        loop_repo: Arc<dyn LoopRepository>,
        check_in_repo: Arc<dyn CheckInRepository>,
    ) -> Self {
        Self {
            loop_repo,
            check_in_repo,
            clock: Arc::new(SystemClock),
            loop_locks: LoopLocks::default(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    async fn streaks_as_of(
        &self,
        loop_id: &LoopId,
        user_id: &UserId,
        reference_day: Day,
    ) -> Result<Streaks, DomainError> {
        let days = self.check_in_repo.list_days(loop_id, user_id).await?;
        Ok(StreakCalculator::compute_sorted(&days, reference_day))
    }
}

#[async_trait]
impl CommandHandler<CheckInCommand> for CheckInCommandHandler {
    type Result = CheckInCommandResult;

    async fn handle(&self, cmd: CheckInCommand) -> Result<Self::Result, DomainError> {
        let now = self.clock.now();
        let day = Day::resolve(cmd.date.as_deref(), now).inspect_err(|e| {
            warn!(loop_id = %cmd.loop_id, error = %e, "rejected check-in date");
        })?;

        let loop_id = LoopId::from_string(&cmd.loop_id);
        let user_id = UserId::from_string(&cmd.user_id);

        self.loop_repo
            .find_owned(&loop_id, &user_id)
            .await?
            .ok_or_else(|| {
                DomainError::LoopNotFound(format!(
                    "Loop {} not found or not owned by {}",
                    loop_id, user_id
                ))
            })?;

        let _guard = self.loop_locks.acquire(&loop_id).await;

        let outcome = self
            .check_in_repo
            .upsert(&loop_id, &user_id, day, now)
            .await?;

        let reference_day = Day::from_timestamp(&now);
        let streaks = self
            .streaks_as_of(&loop_id, &user_id, reference_day)
            .await?;

        if outcome.created {
            self.loop_repo
                .update_streak_fields(&loop_id, streaks)
                .await?;
            info!(
                loop_id = %loop_id,
                day = %day,
                current_streak = streaks.current_streak,
                longest_streak = streaks.longest_streak,
                "check-in recorded"
            );
        } else {
            info!(loop_id = %loop_id, day = %day, "check-in already recorded for day");
        }

        Ok(CheckInCommandResult {
            check_in: CheckInDto::from(&outcome.check_in),
            current_streak: streaks.current_streak,
            longest_streak: streaks.longest_streak,
            created: outcome.created,
        })
    }
}
