use anyhow::Context;

use habit_forge_api::config::Config;
use habit_forge_api::store::{MemoryStore, PgStore, RecordStore};
use habit_forge_api::{db, router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "habit_forge_api=debug,tower_http=debug".into()),
        )
        .json()
        .init();

    let config = Config::from_env()?;

    match config.database_url.clone() {
        Some(database_url) => {
            let pool = db::create_pool(&database_url, config.database_max_connections)
                .await
                .context("Failed to create database pool")?;

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run database migrations")?;

            tracing::info!("Database migrations applied");
            serve(PgStore::new(pool), config).await
        }
        None => {
            tracing::warn!("DATABASE_URL not set, records are kept in memory only");
            serve(MemoryStore::new(), config).await
        }
    }
}

async fn serve<S: RecordStore>(store: S, config: Config) -> anyhow::Result<()> {
    let addr = config.listen_addr();
    let app = router(AppState::new(store, config));

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}
