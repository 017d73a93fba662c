mod aggregate;
mod day;
mod repository;
mod streak;
mod value_objects;


pub use aggregate::CheckIn;
pub use day::{to_day, Day, DAY_FORMAT};
pub use repository::CheckInRepository;
pub use streak::{compute_streaks, StreakCalculator};
pub use value_objects::{CheckInStatus, StreakSummary, Streaks, UpsertOutcome};
