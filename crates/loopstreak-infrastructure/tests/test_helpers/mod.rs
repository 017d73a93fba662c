#![allow(dead_code)]

use chrono::Utc;
use std::sync::Arc;

use loopstreak_domain::check_in::Day;
use loopstreak_domain::habit_loop::{HabitLoop, LoopRepository};
use loopstreak_domain::shared::UserId;
use loopstreak_infrastructure::persistence::repositories::SqliteLoopRepository;
use loopstreak_infrastructure::Database;
use sqlx::SqlitePool;

/// Fresh in-memory database with the schema applied.
pub async fn setup_in_memory_db() -> SqlitePool {
    let db = Database::in_memory().await.expect("open in-memory db");
    db.run_migrations().await.expect("run migrations");
    db.pool().clone()
}

/// Persist a loop owned by `owner` and return it.
pub async fn seed_loop(pool: &SqlitePool, owner: &UserId, name: &str) -> HabitLoop {
    let repo = SqliteLoopRepository::new(Arc::new(pool.clone()));
    let habit = HabitLoop::new(owner.clone(), name.to_string(), Utc::now()).expect("valid loop");
    repo.save(&habit).await.expect("save loop");
    habit
}

pub fn june(d: u32) -> Day {
    Day::from_ymd(2024, 6, d).expect("valid June day")
}
