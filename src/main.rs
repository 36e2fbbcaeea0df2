use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use outfit_api::{
    config::Config,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("outfit_api=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    tracing::info!(
        environment = %config.environment,
        has_serpapi = config.serpapi_key().is_some(),
        "Configuration loaded"
    );

    let state = Arc::new(AppState::new(config)?);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
