use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use loopstreak_domain::shared::LoopId;

/// One async lock per loop. Holding the guard serializes the ledger write,
/// the streak recomputation and the loop update for that loop.
#[derive(Default)]
pub(crate) struct LoopLocks {
    locks: Mutex<HashMap<LoopId, Arc<Mutex<()>>>>,
}

impl LoopLocks {
    pub(crate) async fn acquire(&self, loop_id: &LoopId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Only the map holds idle entries
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(loop_id.clone()).or_default().clone()
        };
        lock.lock_owned().await
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_loop_waits_for_holder() {
        let locks = LoopLocks::default();
        let loop_id = LoopId::from_string("loop-1");

        let guard = locks.acquire(&loop_id).await;
        let blocked =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire(&loop_id)).await;
        assert!(blocked.is_err());

        drop(guard);
        let reacquired =
            tokio::time::timeout(Duration::from_millis(20), locks.acquire(&loop_id)).await;
        assert!(reacquired.is_ok());
    }

    #[tokio::test]
    async fn test_other_loops_are_independent() {
        let locks = LoopLocks::default();
        let _held = locks.acquire(&LoopId::from_string("loop-1")).await;

        let other = tokio::time::timeout(
            Duration::from_millis(20),
            locks.acquire(&LoopId::from_string("loop-2")),
        )
        .await;
        assert!(other.is_ok());
    }

    #[tokio::test]
    async fn test_idle_locks_are_pruned() {
        let locks = LoopLocks::default();
        for i in 0..5 {
            let _guard = locks.acquire(&LoopId::from_string(&format!("loop-{i}"))).await;
        }

        let _guard = locks.acquire(&LoopId::from_string("loop-last")).await;
        assert_eq!(locks.tracked().await, 1);
    }
}
