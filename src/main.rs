use anyhow::{Context, Result};
use tracing::info;
use validation_overrides::{config::Config, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("validation_overrides=info".parse()?),
        )
        .init();

    info!("Starting validation overrides demo server");

    // Load configuration from environment
    let config = Config::from_env()?;
    info!(
        "Loaded overrides for {} route(s), default language '{}'",
        config.routes.len(),
        config.default_lang
    );

    let app = server::router(&config);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
