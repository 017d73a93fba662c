use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::loop_commands::*;
use loopstreak_domain::habit_loop::{HabitLoop, LoopRepository};
use loopstreak_domain::shared::{Clock, DomainError, SystemClock, UserId};

pub struct CreateLoopCommandHandler {
    loop_repo: Arc<dyn LoopRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateLoopCommandHandler {
    pub fn new(loop_repo: Arc<dyn LoopRepository>) -> Self {
        Self {
            loop_repo,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }
}

#[async_trait]
impl CommandHandler<CreateLoopCommand> for CreateLoopCommandHandler {
    type Result = CreateLoopResult;

    async fn handle(&self, cmd: CreateLoopCommand) -> Result<Self::Result, DomainError> {
        let habit = HabitLoop::new(
            UserId::from_string(&cmd.owner_id),
            cmd.name,
            self.clock.now(),
        )?;
        self.loop_repo.save(&habit).await?;

        info!(loop_id = %habit.id(), owner_id = %habit.owner_id(), "loop created");

        Ok(CreateLoopResult {
            loop_id: habit.id().to_string(),
        })
    }
}
