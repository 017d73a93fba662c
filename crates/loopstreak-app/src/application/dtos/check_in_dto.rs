use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loopstreak_domain::check_in::CheckIn;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInDto {
    pub id: String,
    pub loop_id: String,
    pub user_id: String,
    pub date: String, // YYYY-MM-DD
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<&CheckIn> for CheckInDto {
    fn from(check_in: &CheckIn) -> Self {
        Self {
            id: check_in.id().to_string(),
            loop_id: check_in.loop_id().to_string(),
            user_id: check_in.user_id().to_string(),
            date: check_in.day().to_string(),
            status: check_in.status().to_string(),
            created_at: check_in.created_at(),
        }
    }
}
