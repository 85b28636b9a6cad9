use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::habit::Habit;
use crate::models::habit_log::HabitLog;

/// How many of the owner's habits are marked done on one day.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyCompletion {
    pub date: NaiveDate,
    pub done_count: usize,
    pub total: usize,
    pub percentage: u32,
}

pub fn is_done_on(logs: &[HabitLog], habit_id: Uuid, date: NaiveDate) -> bool {
    logs.iter()
        .any(|log| log.habit_id == habit_id && log.date == date)
}

/// Recomputed from scratch on every call. Logs whose habit is not in
/// `habits` never contribute.
pub fn daily_completion(habits: &[Habit], logs: &[HabitLog], today: NaiveDate) -> DailyCompletion {
    let done_count = habits
        .iter()
        .filter(|habit| is_done_on(logs, habit.id, today))
        .count();
    let total = habits.len();

    DailyCompletion {
        date: today,
        done_count,
        total,
        percentage: percentage(done_count, total),
    }
}

/// `done / total` as a whole percent, halves rounded up; zero when `total` is zero.
fn percentage(done: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((done * 200 + total) / (total * 2)) as u32
}
