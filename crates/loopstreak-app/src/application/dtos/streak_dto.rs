use serde::{Deserialize, Serialize};

use loopstreak_domain::check_in::StreakSummary;
use loopstreak_domain::habit_loop::HabitLoop;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreakStatsDto {
    pub loop_id: String,
    pub loop_name: String,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_check_in_days: u32,
    pub last_check_in_date: Option<String>, // YYYY-MM-DD
}

impl StreakStatsDto {
    pub fn new(habit: &HabitLoop, summary: &StreakSummary) -> Self {
        Self {
            loop_id: habit.id().to_string(),
            loop_name: habit.name().to_string(),
            current_streak: summary.streaks.current_streak,
            longest_streak: summary.streaks.longest_streak,
            total_check_in_days: summary.total_check_in_days,
            last_check_in_date: summary.last_check_in_day.map(|d| d.to_string()),
        }
    }
}
