use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Habit {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// A habit that has not been stored yet; the store assigns `id` and `created_at`.
#[derive(Debug, Clone)]
pub struct NewHabit {
    pub owner_id: Uuid,
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub title: String,
}

/// Optional caller-supplied calendar day; defaults to the server's local date.
#[derive(Debug, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct HabitWithStatus {
    #[serde(flatten)]
    pub habit: Habit,
    pub done_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StreakInfo {
    pub habit_id: Uuid,
    pub date: NaiveDate,
    pub done_today: bool,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_logs: usize,
}
