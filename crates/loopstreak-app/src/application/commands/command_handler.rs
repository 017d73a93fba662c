use async_trait::async_trait;

use loopstreak_domain::shared::DomainError;

/// Handles one command type and produces its result.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    type Result: Send;

    async fn handle(&self, cmd: C) -> Result<Self::Result, DomainError>;
}
