use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::params::{request_date, require_title};
use crate::models::habit::{
    CreateHabitRequest, DateQuery, Habit, HabitWithStatus, NewHabit, StreakInfo,
};
use crate::services::completion::is_done_on;
use crate::services::streak::{current_streak, logged_dates, longest_streak};
use crate::store::{RecordKind, RecordStore};
use crate::AppState;

pub async fn list_habits<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<Vec<HabitWithStatus>>> {
    let today = request_date(query.date)?;

    let habits = state.store.habits_for_owner(auth_user.id).await?;
    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;

    let result = habits
        .into_iter()
        .map(|habit| {
            let dates = logged_dates(&logs, habit.id);
            HabitWithStatus {
                done_today: is_done_on(&logs, habit.id, today),
                current_streak: current_streak(dates.iter().copied(), today),
                longest_streak: longest_streak(dates),
                habit,
            }
        })
        .collect();

    Ok(Json(result))
}

pub async fn create_habit<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreateHabitRequest>,
) -> AppResult<Json<Habit>> {
    let title = require_title(&body.title, "Habit")?;

    let habit = state
        .store
        .insert_habit(NewHabit {
            owner_id: auth_user.id,
            title,
        })
        .await?;

    tracing::info!(owner_id = %auth_user.id, habit_id = %habit.id, "Habit created");
    Ok(Json(habit))
}

/// Logs of the deleted habit stay behind; nothing reads them once the habit is gone.
pub async fn delete_habit<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state
        .store
        .delete_by_id(RecordKind::Habit, auth_user.id, habit_id)
        .await?;

    tracing::info!(owner_id = %auth_user.id, habit_id = %habit_id, "Habit deleted");
    Ok(Json(serde_json::json!({ "deleted": true, "id": habit_id })))
}

pub async fn get_streak<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(habit_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<StreakInfo>> {
    let today = request_date(query.date)?;

    let habits = state.store.habits_for_owner(auth_user.id).await?;
    if !habits.iter().any(|h| h.id == habit_id) {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;
    let dates = logged_dates(&logs, habit_id);

    Ok(Json(StreakInfo {
        habit_id,
        date: today,
        done_today: dates.contains(&today),
        current_streak: current_streak(dates.iter().copied(), today),
        longest_streak: longest_streak(dates.iter().copied()),
        total_logs: dates.len(),
    }))
}
