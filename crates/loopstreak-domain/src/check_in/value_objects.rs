use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::aggregate::CheckIn;
use super::day::Day;
use crate::shared::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInStatus {
    Done,
}

impl CheckInStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckInStatus::Done => "done",
        }
    }
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CheckInStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "done" => Ok(CheckInStatus::Done),
            other => Err(DomainError::DataIntegrity(format!(
                "Unknown check-in status: {}",
                other
            ))),
        }
    }
}

/// Derived streak metrics of a loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streaks {
    pub current_streak: u32,
    pub longest_streak: u32,
}

impl Streaks {
    pub const ZERO: Streaks = Streaks {
        current_streak: 0,
        longest_streak: 0,
    };

    pub fn new(current_streak: u32, longest_streak: u32) -> Self {
        Self {
            current_streak,
            longest_streak,
        }
    }
}

/// Streaks plus the history totals shown alongside them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub streaks: Streaks,
    pub total_check_in_days: u32,
    pub last_check_in_day: Option<Day>,
}

/// Result of an idempotent ledger write.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    pub check_in: CheckIn,
    /// `false` when the record already existed, including when a concurrent
    /// writer won the uniqueness race.
    pub created: bool,
}
