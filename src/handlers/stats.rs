use axum::{
    extract::{Query, State},
    Extension, Json,
};

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::handlers::params::request_date;
use crate::models::habit::DateQuery;
use crate::services::completion::{daily_completion, DailyCompletion};
use crate::store::RecordStore;
use crate::AppState;

pub async fn get_daily_stats<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<DateQuery>,
) -> AppResult<Json<DailyCompletion>> {
    let today = request_date(query.date)?;

    let habits = state.store.habits_for_owner(auth_user.id).await?;
    let logs = state.store.habit_logs_for_owner(auth_user.id).await?;

    Ok(Json(daily_completion(&habits, &logs, today)))
}
