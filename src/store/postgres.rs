use sqlx::PgPool;
use uuid::Uuid;

use super::{RecordKind, RecordStore, StoreError, StoreResult};
use crate::models::habit::{Habit, NewHabit};
use crate::models::habit_log::{HabitLog, NewHabitLog};
use crate::models::post::{NewPost, Post, PostChanges};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

impl RecordStore for PgStore {
    async fn insert_habit(&self, habit: NewHabit) -> StoreResult<Habit> {
        let habit = sqlx::query_as::<_, Habit>(
            r#"
            INSERT INTO habits (id, owner_id, title)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(habit.owner_id)
        .bind(&habit.title)
        .fetch_one(&self.db)
        .await?;

        Ok(habit)
    }

    async fn insert_habit_log(&self, log: NewHabitLog) -> StoreResult<HabitLog> {
        let log = sqlx::query_as::<_, HabitLog>(
            r#"
            INSERT INTO habit_logs (id, habit_id, owner_id, log_date)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(log.habit_id)
        .bind(log.owner_id)
        .bind(log.date)
        .fetch_one(&self.db)
        .await?;

        Ok(log)
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (id, owner_id, title, content, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(post.owner_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.status)
        .fetch_one(&self.db)
        .await?;

        Ok(post)
    }

    async fn update_post(
        &self,
        owner_id: Uuid,
        id: Uuid,
        changes: PostChanges,
    ) -> StoreResult<Post> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET
                title = COALESCE($3, title),
                content = COALESCE($4, content),
                status = COALESCE($5, status)
            WHERE id = $1 AND owner_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.status)
        .fetch_optional(&self.db)
        .await?
        .ok_or(StoreError::NotFound {
            kind: RecordKind::Post,
            id,
        })
    }

    async fn delete_by_id(&self, kind: RecordKind, owner_id: Uuid, id: Uuid) -> StoreResult<()> {
        // Table names come from RecordKind, never from the caller.
        let sql = format!("DELETE FROM {} WHERE id = $1 AND owner_id = $2", kind.table());
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(owner_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { kind, id });
        }
        Ok(())
    }

    async fn habits_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(
            "SELECT * FROM habits WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(habits)
    }

    async fn habit_logs_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<HabitLog>> {
        let logs = sqlx::query_as::<_, HabitLog>(
            "SELECT * FROM habit_logs WHERE owner_id = $1 ORDER BY log_date DESC, created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }

    async fn posts_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    async fn published_posts(&self) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM posts WHERE status = 'published' ORDER BY created_at DESC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    async fn published_posts_for_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT * FROM posts
            WHERE owner_id = $1 AND status = 'published'
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.db)
        .await?;

        Ok(posts)
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
