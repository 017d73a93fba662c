use std::sync::Arc;

use loopstreak_domain::check_in::Streaks;
use loopstreak_domain::habit_loop::LoopRepository;
use loopstreak_domain::shared::{DomainError, LoopId, UserId};
use loopstreak_infrastructure::persistence::repositories::SqliteLoopRepository;
use loopstreak_infrastructure::{Database, DatabaseOptions};

mod test_helpers;

#[tokio::test]
async fn loop_repo_find_owned_checks_owner_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let owner = UserId::new();
    let habit = test_helpers::seed_loop(&pool, &owner, "Read 20 pages").await;
    let repo = SqliteLoopRepository::new(Arc::new(pool.clone()));

    let found = repo
        .find_owned(habit.id(), &owner)
        .await
        .expect("find owned")
        .expect("loop should be visible to its owner");
    assert_eq!(found.name(), "Read 20 pages");
    assert_eq!(found.streaks(), Streaks::ZERO);

    let stranger = repo
        .find_owned(habit.id(), &UserId::new())
        .await
        .expect("find owned by stranger");
    assert!(stranger.is_none());

    assert!(repo.find_by_id(habit.id()).await.unwrap().is_some());
    assert!(repo.find_by_id(&LoopId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn loop_repo_update_streak_fields_integration() {
    let pool = test_helpers::setup_in_memory_db().await;
    let owner = UserId::new();
    let habit = test_helpers::seed_loop(&pool, &owner, "Floss").await;
    let repo = SqliteLoopRepository::new(Arc::new(pool.clone()));

    repo.update_streak_fields(habit.id(), Streaks::new(3, 7))
        .await
        .expect("update streaks");

    let reloaded = repo.find_by_id(habit.id()).await.unwrap().unwrap();
    assert_eq!(reloaded.current_streak(), 3);
    assert_eq!(reloaded.longest_streak(), 7);

    match repo
        .update_streak_fields(&LoopId::new(), Streaks::new(1, 1))
        .await
    {
        Err(DomainError::LoopNotFound(_)) => {}
        other => panic!("Expected LoopNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn database_file_is_created_with_parent_dirs_integration() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("loopstreak.db");
    let path_str = path.to_str().unwrap();

    let db = Database::new(path_str, DatabaseOptions::default())
        .await
        .expect("open file database");
    db.run_migrations().await.expect("run migrations");
    // Running twice is a no-op
    db.run_migrations().await.expect("re-run migrations");

    assert!(path.exists());

    let owner = UserId::new();
    let habit = test_helpers::seed_loop(db.pool(), &owner, "Sleep early").await;
    let repo = SqliteLoopRepository::with_timeouts(Arc::new(db.pool().clone()), db.timeouts());
    assert!(repo.find_owned(habit.id(), &owner).await.unwrap().is_some());
}
