use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::middleware::require_auth;
use crate::handlers;
use crate::store::RecordStore;
use crate::AppState;

pub fn router<S: RecordStore>(state: AppState<S>) -> Router {
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz::<S>))
        .route("/api/public/posts", get(handlers::posts::list_public_posts::<S>))
        .route(
            "/api/public/posts/:id",
            get(handlers::posts::get_public_post::<S>),
        )
        .route(
            "/api/public/users/:owner_id/posts",
            get(handlers::posts::list_author_posts::<S>),
        );

    let protected_routes = Router::new()
        // Habits
        .route(
            "/api/habits",
            get(handlers::habits::list_habits::<S>).post(handlers::habits::create_habit::<S>),
        )
        .route("/api/habits/:id", delete(handlers::habits::delete_habit::<S>))
        .route(
            "/api/habits/:id/streak",
            get(handlers::habits::get_streak::<S>),
        )
        // Habit logs
        .route(
            "/api/habit-logs",
            get(handlers::habit_logs::list_habit_logs::<S>),
        )
        .route(
            "/api/habit-logs/toggle",
            post(handlers::habit_logs::toggle_habit_log::<S>),
        )
        // Stats
        .route("/api/stats/daily", get(handlers::stats::get_daily_stats::<S>))
        // Posts
        .route(
            "/api/posts",
            get(handlers::posts::list_posts::<S>).post(handlers::posts::create_post::<S>),
        )
        .route(
            "/api/posts/:id",
            get(handlers::posts::get_post::<S>)
                .put(handlers::posts::update_post::<S>)
                .delete(handlers::posts::delete_post::<S>),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_auth::<S>,
        ));

    let cors = cors_layer(&state.config.allowed_origins());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
