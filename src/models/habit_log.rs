use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::services::completion::DailyCompletion;
use crate::services::toggle::ToggleAction;

/// A record asserting that a habit was completed on one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct HabitLog {
    pub id: Uuid,
    pub habit_id: Uuid,
    pub owner_id: Uuid,
    #[sqlx(rename = "log_date")]
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHabitLog {
    pub habit_id: Uuid,
    pub owner_id: Uuid,
    pub date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct ToggleRequest {
    pub habit_id: Uuid,
    pub date: Option<NaiveDate>,
}

/// What a toggle did, together with values derived from the re-fetched logs.
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleResponse {
    #[serde(flatten)]
    pub action: ToggleAction,
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub done_today: bool,
    pub current_streak: u32,
    pub completion: DailyCompletion,
}
