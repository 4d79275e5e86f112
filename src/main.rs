use std::sync::Arc;

use anyhow::Context;
use service_catalog::config;
use service_catalog::database::{
    DatabaseManager, MemoryServiceStore, PgServiceStore, ServiceRepository, ServiceStore,
};
use service_catalog::middleware::AuthGate;
use service_catalog::routes;
use service_catalog::state::{AppState, ListLimits};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();
    service_catalog::logging::init_tracing();

    let config = config::config();
    tracing::info!("Starting service catalog in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set");
    }

    let store: Arc<dyn ServiceStore> = match config.database.url {
        Some(_) => {
            let pool = DatabaseManager::connect(&config.database)
                .await
                .context("failed to connect to database")?;
            let store = PgServiceStore::new(pool);
            store
                .ensure_collection()
                .await
                .context("failed to prepare services collection")?;
            Arc::new(store)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; entries are kept in memory only");
            Arc::new(MemoryServiceStore::new())
        }
    };

    let repository = ServiceRepository::new(store, config.database.operation_timeout());
    let state = AppState::new(repository, ListLimits::from(config));
    let gate = AuthGate::jwt(config.security.jwt_secret.clone());
    let app = routes::app(state, &gate, routes::cors_layer(&config.security.cors_origins));

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Service catalog listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
