use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use crate::store::RecordStore;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "habit-forge-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn readyz<S: RecordStore>(State(state): State<AppState<S>>) -> (StatusCode, Json<Value>) {
    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "checks": { "store": "ok" },
            })),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not_ready",
                    "checks": { "store": "failed" },
                })),
            )
        }
    }
}
