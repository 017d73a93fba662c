use serde::{Deserialize, Serialize};

use crate::application::dtos::CheckInDto;

/// Mark a loop as done for a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckInCommand {
    pub loop_id: String,
    pub user_id: String,
    /// Timestamp or `YYYY-MM-DD`; absent or blank means "now".
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInCommandResult {
    pub check_in: CheckInDto,
    pub current_streak: u32,
    pub longest_streak: u32,
    /// `false` when the day was already checked in.
    pub created: bool,
}
