use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::params::request_date;
use crate::models::habit_log::{HabitLog, ToggleRequest, ToggleResponse};
use crate::services::completion::{daily_completion, is_done_on};
use crate::services::streak::{current_streak, logged_dates};
use crate::services::toggle::toggle_log;
use crate::store::RecordStore;
use crate::AppState;

pub async fn list_habit_logs<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<HabitLog>>> {
    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;
    Ok(Json(logs))
}

/// Creates today's log if missing, deletes it if present.
pub async fn toggle_habit_log<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<ToggleRequest>,
) -> AppResult<Json<ToggleResponse>> {
    let today = request_date(body.date)?;

    let habits = state.store.habits_for_owner(auth_user.id).await?;
    if !habits.iter().any(|h| h.id == body.habit_id) {
        return Err(AppError::NotFound("Habit not found".into()));
    }

    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;
    let action = toggle_log(&state.store, auth_user.id, &logs, body.habit_id, today).await?;

    // Derived values are only valid against a fresh read.
    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;

    Ok(Json(ToggleResponse {
        action,
        habit_id: body.habit_id,
        date: today,
        done_today: is_done_on(&logs, body.habit_id, today),
        current_streak: current_streak(logged_dates(&logs, body.habit_id), today),
        completion: daily_completion(&habits, &logs, today),
    }))
}
