pub mod check_in_repo;
pub mod loop_repo;

pub use check_in_repo::SqliteCheckInRepository;
pub use loop_repo::SqliteLoopRepository;
