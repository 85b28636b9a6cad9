use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{RecordKind, RecordStore, StoreError, StoreResult};
use crate::models::habit::{Habit, NewHabit};
use crate::models::habit_log::{HabitLog, NewHabitLog};
use crate::models::post::{NewPost, Post, PostChanges};

/// Process-local store used when no database is configured, and by tests.
///
/// Rows are kept in insertion order, so reversing a table yields newest first.
#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Default)]
struct Tables {
    habits: Vec<Habit>,
    habit_logs: Vec<HabitLog>,
    posts: Vec<Post>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    async fn insert_habit(&self, habit: NewHabit) -> StoreResult<Habit> {
        let habit = Habit {
            id: Uuid::new_v4(),
            owner_id: habit.owner_id,
            title: habit.title,
            created_at: Utc::now(),
        };
        self.tables.lock().await.habits.push(habit.clone());
        Ok(habit)
    }

    async fn insert_habit_log(&self, log: NewHabitLog) -> StoreResult<HabitLog> {
        let log = HabitLog {
            id: Uuid::new_v4(),
            habit_id: log.habit_id,
            owner_id: log.owner_id,
            date: log.date,
            created_at: Utc::now(),
        };
        self.tables.lock().await.habit_logs.push(log.clone());
        Ok(log)
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let post = Post {
            id: Uuid::new_v4(),
            owner_id: post.owner_id,
            title: post.title,
            content: post.content,
            status: post.status,
            created_at: Utc::now(),
        };
        self.tables.lock().await.posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> StoreResult<Post> {
        let mut tables = self.tables.lock().await;
        let post = tables
            .posts
            .iter_mut()
            .find(|p| p.id == id && p.owner_id == owner_id)
            .ok_or(StoreError::NotFound {
                kind: RecordKind::Post,
                id,
            })?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(content) = changes.content {
            post.content = content;
        }
        if let Some(status) = changes.status {
            post.status = status;
        }
        Ok(post.clone())
    }

    async fn delete_by_id(&self, kind: RecordKind, owner_id: Uuid, id: Uuid) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        let removed = match kind {
            RecordKind::Habit => remove_owned(&mut tables.habits, |h| h.id == id && h.owner_id == owner_id),
            RecordKind::HabitLog => {
                remove_owned(&mut tables.habit_logs, |l| l.id == id && l.owner_id == owner_id)
            }
            RecordKind::Post => remove_owned(&mut tables.posts, |p| p.id == id && p.owner_id == owner_id),
        };

        if !removed {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }

    async fn habits_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Habit>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .habits
            .iter()
            .rev()
            .filter(|h| h.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn habit_logs_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<HabitLog>> {
        let tables = self.tables.lock().await;
        let mut logs: Vec<HabitLog> = tables
            .habit_logs
            .iter()
            .rev()
            .filter(|l| l.owner_id == owner_id)
            .cloned()
            .collect();
        logs.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(logs)
    }

    async fn posts_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn published_posts(&self) -> StoreResult<Vec<Post>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.is_published())
            .cloned()
            .collect())
    }

    async fn published_posts_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .iter()
            .rev()
            .filter(|p| p.owner_id == owner_id && p.is_published())
            .cloned()
            .collect())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

fn remove_owned<T>(rows: &mut Vec<T>, matches: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|row| !matches(row));
    rows.len() != before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::post::PostStatus;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    async fn habit(store: &MemoryStore, owner_id: Uuid, title: &str) -> Habit {
        store
            .insert_habit(NewHabit {
                owner_id,
                title: title.into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn queries_are_scoped_to_the_owner() {
        let store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        habit(&store, alice, "Read").await;
        habit(&store, bob, "Run").await;

        let habits = store.habits_for_owner(alice).await.unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].title, "Read");
        assert!(store.habits_for_owner(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn habits_come_back_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        habit(&store, owner, "First").await;
        habit(&store, owner, "Second").await;

        let titles: Vec<_> = store
            .habits_for_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|h| h.title)
            .collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[tokio::test]
    async fn logs_are_ordered_by_date_descending() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let h = habit(&store, owner, "Read").await;
        for d in [3, 9, 5] {
            store
                .insert_habit_log(NewHabitLog {
                    habit_id: h.id,
                    owner_id: owner,
                    date: day(d),
                })
                .await
                .unwrap();
        }

        let dates: Vec<_> = store
            .habit_logs_for_owner(owner)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.date)
            .collect();
        assert_eq!(dates, vec![day(9), day(5), day(3)]);
    }

    #[tokio::test]
    async fn deleting_a_missing_or_foreign_record_is_not_found() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let h = habit(&store, owner, "Read").await;

        let err = store
            .delete_by_id(RecordKind::Habit, Uuid::new_v4(), h.id)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Habit, id } if id == h.id));

        store.delete_by_id(RecordKind::Habit, owner, h.id).await.unwrap();
        assert!(store.habits_for_owner(owner).await.unwrap().is_empty());
        assert!(store
            .delete_by_id(RecordKind::Habit, owner, h.id)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn deleting_a_habit_leaves_its_logs() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let h = habit(&store, owner, "Read").await;
        store
            .insert_habit_log(NewHabitLog {
                habit_id: h.id,
                owner_id: owner,
                date: day(1),
            })
            .await
            .unwrap();

        store.delete_by_id(RecordKind::Habit, owner, h.id).await.unwrap();
        assert_eq!(store.habit_logs_for_owner(owner).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn post_updates_are_partial_and_publishing_is_visible_publicly() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let post = store
            .insert_post(NewPost {
                owner_id: owner,
                title: "Hello".into(),
                content: "Body".into(),
                status: PostStatus::Draft,
            })
            .await
            .unwrap();
        assert!(store.published_posts().await.unwrap().is_empty());

        let updated = store
            .update_post(
                owner,
                post.id,
                PostChanges {
                    status: Some(PostStatus::Published),
                    ..PostChanges::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.title, "Hello");
        assert_eq!(updated.content, "Body");
        assert!(updated.is_published());
        assert_eq!(store.published_posts().await.unwrap().len(), 1);

        let err = store
            .update_post(Uuid::new_v4(), post.id, PostChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: RecordKind::Post, .. }));
    }

    #[tokio::test]
    async fn author_feed_keeps_only_that_authors_published_posts() {
        let store = MemoryStore::new();
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();
        for (owner_id, title, status) in [
            (author, "Old", PostStatus::Published),
            (author, "Draft", PostStatus::Draft),
            (other, "Elsewhere", PostStatus::Published),
            (author, "New", PostStatus::Published),
        ] {
            store
                .insert_post(NewPost {
                    owner_id,
                    title: title.into(),
                    content: String::new(),
                    status,
                })
                .await
                .unwrap();
        }

        let titles: Vec<_> = store
            .published_posts_for_owner(author)
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["New", "Old"]);
        assert!(store
            .published_posts_for_owner(Uuid::new_v4())
            .await
            .unwrap()
            .is_empty());
    }
}
