// Domain layer - streak rules and check-in model
// No dependencies on infrastructure or application layers

pub mod check_in;
pub mod habit_loop;
pub mod shared;

// Re-exports for convenience
pub use check_in::{CheckIn, Day, StreakCalculator, Streaks};
pub use habit_loop::HabitLoop;
pub use shared::{DomainError, LoopId, UserId};
