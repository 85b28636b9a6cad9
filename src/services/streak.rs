//! Consecutive-day streaks over a habit's logged dates.
//!
//! Everything here works on a snapshot of dates and never touches the store.
//! Duplicate dates count as a single day.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::habit_log::HabitLog;

/// Dates on which `habit_id` has a log, deduplicated and ascending.
pub fn logged_dates(logs: &[HabitLog], habit_id: Uuid) -> BTreeSet<NaiveDate> {
    logs.iter()
        .filter(|log| log.habit_id == habit_id)
        .map(|log| log.date)
        .collect()
}

/// Length of the run of consecutive days that ends on `today` or the day
/// before it.
///
/// A habit not yet marked today keeps the streak it had yesterday; only when
/// both today and yesterday are unmarked is the streak zero, regardless of
/// how long the history further back is.
pub fn current_streak<I>(dates: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();
    let mut newest_first = distinct.iter().rev();

    let Some(&most_recent) = newest_first.next() else {
        return 0;
    };

    // NaiveDate::MIN has no yesterday.
    let yesterday = today.pred_opt();
    if most_recent != today && Some(most_recent) != yesterday {
        return 0;
    }

    let mut streak = 1;
    let mut later = most_recent;
    for &earlier in newest_first {
        if (later - earlier).num_days() != 1 {
            break;
        }
        streak += 1;
        later = earlier;
    }
    streak
}

/// Longest run of consecutive days anywhere in the history.
pub fn longest_streak<I>(dates: I) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = dates.into_iter().collect();

    let mut longest = 0u32;
    let mut streak = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for &date in &distinct {
        streak = match prev {
            Some(p) if p.succ_opt() == Some(date) => streak + 1,
            _ => 1,
        };
        longest = longest.max(streak);
        prev = Some(date);
    }
    longest
}
