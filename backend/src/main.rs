//! FarmConnect - Backend Server binary

use std::{net::SocketAddr, sync::Arc};

use farmconnect_backend::{config::Config, create_app, storage::FileBackend, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "farmconnect_server=debug,farmconnect_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting FarmConnect Server");
    tracing::info!("Environment: {}", config.environment);

    tracing::info!("Opening profile storage in {}", config.storage.data_dir.display());
    let backend = FileBackend::new(&config.storage.data_dir)?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    // Create application state
    let state = AppState::new(config, Arc::new(backend))?;
    if !state.store.is_available() {
        tracing::warn!("Profile storage is not writable; registrations will fail");
    }

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
