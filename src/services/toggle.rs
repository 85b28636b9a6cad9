use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::habit_log::{HabitLog, NewHabitLog};
use crate::store::{RecordKind, RecordStore};

/// The single write a toggle issues, decided from the caller's log snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TogglePlan {
    Insert,
    Delete(Uuid),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ToggleAction {
    Created { log_id: Uuid },
    Deleted { log_id: Uuid },
}

pub fn plan_toggle(logs: &[HabitLog], habit_id: Uuid, today: NaiveDate) -> TogglePlan {
    logs.iter()
        .find(|log| log.habit_id == habit_id && log.date == today)
        .map_or(TogglePlan::Insert, |log| TogglePlan::Delete(log.id))
}

/// Flips the completion mark of `habit_id` for `today`.
///
/// `logs` is the owner's currently loaded log collection. Exactly one insert
/// or delete reaches the store; its failure is returned as-is and nothing is
/// retried. Callers must re-query the logs before deriving streaks or
/// completion from them again.
pub async fn toggle_log<S: RecordStore>(
    store: &S,
    owner_id: Uuid,
    logs: &[HabitLog],
    habit_id: Uuid,
    today: NaiveDate,
) -> AppResult<ToggleAction> {
    let action = match plan_toggle(logs, habit_id, today) {
        TogglePlan::Delete(log_id) => {
            store
                .delete_by_id(RecordKind::HabitLog, owner_id, log_id)
                .await?;
            ToggleAction::Deleted { log_id }
        }
        TogglePlan::Insert => {
            let log = store
                .insert_habit_log(NewHabitLog {
                    habit_id,
                    owner_id,
                    date: today,
                })
                .await?;
            ToggleAction::Created { log_id: log.id }
        }
    };

    tracing::info!(
        owner_id = %owner_id,
        habit_id = %habit_id,
        date = %today,
        action = ?action,
        "Habit log toggled"
    );

    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::habit::{Habit, NewHabit};
    use crate::models::post::{NewPost, Post, PostChanges};
    use crate::services::completion::daily_completion;
    use crate::services::streak::{current_streak, logged_dates};
    use crate::store::{MemoryStore, StoreError, StoreResult};
    use chrono::Utc;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 10).unwrap()
    }

    /// Accepts reads, rejects every write.
    #[derive(Clone)]
    struct RejectingStore;

    fn rejected() -> StoreError {
        StoreError::Database(sqlx::Error::PoolClosed)
    }

    impl RecordStore for RejectingStore {
        async fn insert_habit(&self, _: NewHabit) -> StoreResult<Habit> {
            Err(rejected())
        }
        async fn insert_habit_log(&self, _: NewHabitLog) -> StoreResult<HabitLog> {
            Err(rejected())
        }
        async fn insert_post(&self, _: NewPost) -> StoreResult<Post> {
            Err(rejected())
        }
        async fn update_post(&self, _: Uuid, _: Uuid, _: PostChanges) -> StoreResult<Post> {
            Err(rejected())
        }
        async fn delete_by_id(&self, _: RecordKind, _: Uuid, _: Uuid) -> StoreResult<()> {
            Err(rejected())
        }
        async fn habits_for_owner(&self, _: Uuid) -> StoreResult<Vec<Habit>> {
            Ok(Vec::new())
        }
        async fn habit_logs_for_owner(&self, _: Uuid) -> StoreResult<Vec<HabitLog>> {
            Ok(Vec::new())
        }
        async fn posts_for_owner(&self, _: Uuid) -> StoreResult<Vec<Post>> {
            Ok(Vec::new())
        }
        async fn published_posts(&self) -> StoreResult<Vec<Post>> {
            Ok(Vec::new())
        }
        async fn published_posts_for_owner(&self, _: Uuid) -> StoreResult<Vec<Post>> {
            Ok(Vec::new())
        }
        async fn ping(&self) -> StoreResult<()> {
            Ok(())
        }
    }

    fn log(habit_id: Uuid, date: NaiveDate) -> HabitLog {
        HabitLog {
            id: Uuid::new_v4(),
            habit_id,
            owner_id: Uuid::new_v4(),
            date,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn plan_inserts_when_today_is_unmarked() {
        let habit_id = Uuid::new_v4();
        let logs = vec![
            log(habit_id, today() - chrono::Duration::days(1)),
            log(Uuid::new_v4(), today()),
        ];
        assert_eq!(plan_toggle(&logs, habit_id, today()), TogglePlan::Insert);
    }

    #[test]
    fn plan_deletes_todays_log() {
        let habit_id = Uuid::new_v4();
        let existing = log(habit_id, today());
        let plan = plan_toggle(&[existing.clone()], habit_id, today());
        assert_eq!(plan, TogglePlan::Delete(existing.id));
    }

    #[tokio::test]
    async fn toggling_twice_restores_the_log_collection() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let habit = store
            .insert_habit(NewHabit {
                owner_id: owner,
                title: "Read".into(),
            })
            .await
            .unwrap();
        let before = store.habit_logs_for_owner(owner).await.unwrap();

        let first = toggle_log(&store, owner, &before, habit.id, today())
            .await
            .unwrap();
        let after_first = store.habit_logs_for_owner(owner).await.unwrap();
        assert!(matches!(first, ToggleAction::Created { .. }));
        assert_eq!(after_first.len(), 1);

        let second = toggle_log(&store, owner, &after_first, habit.id, today())
            .await
            .unwrap();
        let after_second = store.habit_logs_for_owner(owner).await.unwrap();
        assert_eq!(
            second,
            ToggleAction::Deleted {
                log_id: after_first[0].id
            }
        );
        assert_eq!(after_second, before);
    }

    #[tokio::test]
    async fn streak_and_completion_follow_toggles() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let habit = store
            .insert_habit(NewHabit {
                owner_id: owner,
                title: "Meditate".into(),
            })
            .await
            .unwrap();
        let habits = store.habits_for_owner(owner).await.unwrap();

        let logs = store.habit_logs_for_owner(owner).await.unwrap();
        assert_eq!(current_streak(logged_dates(&logs, habit.id), today()), 0);
        let baseline = daily_completion(&habits, &logs, today()).done_count;
        assert_eq!(baseline, 0);

        toggle_log(&store, owner, &logs, habit.id, today()).await.unwrap();
        let logs = store.habit_logs_for_owner(owner).await.unwrap();
        assert_eq!(current_streak(logged_dates(&logs, habit.id), today()), 1);
        assert_eq!(daily_completion(&habits, &logs, today()).done_count, baseline + 1);

        toggle_log(&store, owner, &logs, habit.id, today()).await.unwrap();
        let logs = store.habit_logs_for_owner(owner).await.unwrap();
        assert_eq!(current_streak(logged_dates(&logs, habit.id), today()), 0);
        assert_eq!(daily_completion(&habits, &logs, today()).done_count, baseline);
    }

    #[tokio::test]
    async fn rejected_writes_surface_as_persistence_errors() {
        let habit_id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let err = toggle_log(&RejectingStore, owner, &[], habit_id, today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(StoreError::Database(_))));

        let existing = log(habit_id, today());
        let err = toggle_log(&RejectingStore, owner, &[existing], habit_id, today())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Persistence(_)));
    }

    #[tokio::test]
    async fn deleting_a_stale_log_reports_not_found() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let habit_id = Uuid::new_v4();
        let stale = vec![log(habit_id, today())];

        let err = toggle_log(&store, owner, &stale, habit_id, today())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Persistence(StoreError::NotFound {
                kind: RecordKind::HabitLog,
                ..
            })
        ));
        assert!(store.habit_logs_for_owner(owner).await.unwrap().is_empty());
    }
}
