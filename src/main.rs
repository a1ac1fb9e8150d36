use anyhow::Context;
use tracing_subscriber::EnvFilter;

use destinations_api::{config::AppConfig, database, routes, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("loading configuration")?;
    tracing::info!("starting destinations API in {:?} mode", config.environment);

    let pool = database::connect(&config.database)
        .await
        .context("creating database pool")?;
    sqlx::migrate!()
        .run(&pool)
        .await
        .context("running migrations")?;

    let app = routes::app(AppState::new(pool, config));

    // Allow deployments to override the port via env
    let port = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(3000);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    tracing::info!("listening on http://0.0.0.0:{}", port);

    axum::serve(listener, app).await.context("server")?;
    Ok(())
}
