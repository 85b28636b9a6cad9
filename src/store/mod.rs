//! Durable storage for habits, habit logs and posts.
//!
//! Every query is scoped to an owner except [`RecordStore::published_posts`],
//! which backs the public feed across all authors.

use std::fmt;
use std::future::Future;

use uuid::Uuid;

use crate::models::habit::{Habit, NewHabit};
use crate::models::habit_log::{HabitLog, NewHabitLog};
use crate::models::post::{NewPost, Post, PostChanges};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Habit,
    HabitLog,
    Post,
}

impl RecordKind {
    pub fn table(self) -> &'static str {
        match self {
            RecordKind::Habit => "habits",
            RecordKind::HabitLog => "habit_logs",
            RecordKind::Post => "posts",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecordKind::Habit => "Habit",
            RecordKind::HabitLog => "Habit log",
            RecordKind::Post => "Post",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{kind} {id} not found")]
    NotFound { kind: RecordKind, id: Uuid },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Insert, delete-by-id and query-all-for-owner over the three record kinds.
///
/// Records are never cached by callers of this trait: every read is a full
/// re-query, and a failed write leaves the stored state untouched.
pub trait RecordStore: Clone + Send + Sync + 'static {
    fn insert_habit(&self, habit: NewHabit) -> impl Future<Output = StoreResult<Habit>> + Send;

    fn insert_habit_log(
        &self,
        log: NewHabitLog,
    ) -> impl Future<Output = StoreResult<HabitLog>> + Send;

    fn insert_post(&self, post: NewPost) -> impl Future<Output = StoreResult<Post>> + Send;

    fn update_post(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> impl Future<Output = StoreResult<Post>> + Send;

    /// Fails with [`StoreError::NotFound`] when the owner has no such record.
    fn delete_by_id(
        &self,
        kind: RecordKind,
        owner_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = StoreResult<()>> + Send;

    /// Newest first.
    fn habits_for_owner(&self, owner_id: Uuid)
        -> impl Future<Output = StoreResult<Vec<Habit>>> + Send;

    /// Most recent date first.
    fn habit_logs_for_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<HabitLog>>> + Send;

    /// Newest first.
    fn posts_for_owner(&self, owner_id: Uuid) -> impl Future<Output = StoreResult<Vec<Post>>> + Send;

    /// Published posts of every owner, newest first.
    fn published_posts(&self) -> impl Future<Output = StoreResult<Vec<Post>>> + Send;

    /// One author's published posts, newest first. Drafts are left out.
    fn published_posts_for_owner(
        &self,
        owner_id: Uuid,
    ) -> impl Future<Output = StoreResult<Vec<Post>>> + Send;

    fn ping(&self) -> impl Future<Output = StoreResult<()>> + Send;
}
