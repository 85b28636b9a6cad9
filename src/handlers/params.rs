use chrono::{Datelike, Local, NaiveDate};

use crate::error::{AppError, AppResult};

/// Dates must fit a four-digit `YYYY-MM-DD`, which also keeps them inside
/// the range a Postgres `DATE` column stores.
const MIN_YEAR: i32 = 1;
const MAX_YEAR: i32 = 9999;

/// The caller's calendar day, or the server's local date when none was sent.
pub fn request_date(date: Option<NaiveDate>) -> AppResult<NaiveDate> {
    let date = date.unwrap_or_else(|| Local::now().date_naive());
    if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        return Err(AppError::Validation(format!(
            "date must be between {MIN_YEAR:04}-01-01 and {MAX_YEAR}-12-31"
        )));
    }
    Ok(date)
}

/// Rejects titles that are empty once surrounding whitespace is removed.
pub fn require_title(title: &str, what: &str) -> AppResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation(format!("{what} title is required")));
    }
    Ok(trimmed.to_string())
}
