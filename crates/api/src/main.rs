use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use solar_api::config::{ServerConfig, StoreBackend};
use solar_api::router::build_app_router;
use solar_api::state::AppState;
use solar_api::{telemetry, ws};
use solar_db::{DocumentStore, MemoryStore, PgStore};
use solar_events::EventBus;
use tokio::sync::Notify;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;
    telemetry::init_tracing(config.log_format);
    tracing::info!(
        host = %config.host,
        port = config.port,
        backend = %config.store_backend,
        "Loaded server configuration"
    );

    // --- Event bus ---
    let bus = Arc::new(EventBus::default());

    // --- Store ---
    let mut listener_handle = None;
    let store: Arc<dyn DocumentStore> = match config.store_backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            Arc::new(MemoryStore::new(Arc::clone(&bus)))
        }
        StoreBackend::Postgres => {
            let url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL must be set for the postgres backend")?;

            let pool = solar_db::create_pool(url, config.db_max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connection pool created");

            solar_db::health_check(&pool)
                .await
                .context("Database health check failed")?;

            solar_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            listener_handle = Some(solar_db::listener::listen_for_changes(
                pool.clone(),
                Arc::clone(&bus),
            ));
            Arc::new(PgStore::new(pool))
        }
    };

    // --- App state (starts the snapshot feed) ---
    let state = AppState::new(config.clone(), store, &bus)
        .await
        .context("Failed to load initial snapshots")?;
    let ws_manager = Arc::clone(&state.ws_manager);

    // --- WebSocket push ---
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    // --- Router ---
    let app = build_app_router(state);

    // --- Start server ---
    let host: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let tcp = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let shutdown = Arc::new(Notify::new());
    let server_shutdown = Arc::clone(&shutdown);
    let server = tokio::spawn(async move {
        axum::serve(tcp, app)
            .with_graceful_shutdown(async move { server_shutdown.notified().await })
            .await
    });

    shutdown_signal().await;

    // Open WebSocket connections would otherwise hold the drain forever.
    let ws_count = ws_manager.connection_count().await;
    tracing::info!(ws_count, "Closing WebSocket connections");
    ws_manager.shutdown_all().await;
    shutdown.notify_one();

    let drain = Duration::from_secs(config.shutdown_timeout_secs);
    match tokio::time::timeout(drain, server).await {
        Ok(joined) => joined
            .context("Server task panicked")?
            .context("Server error")?,
        Err(_) => tracing::warn!(
            timeout_secs = config.shutdown_timeout_secs,
            "Graceful shutdown timed out, dropping remaining connections"
        ),
    }

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped, cleaning up");

    if let Some(handle) = listener_handle {
        handle.abort();
    }
    heartbeat_handle.abort();
    tracing::info!("Graceful shutdown complete");
    Ok(())
}

/// Wait for SIGINT or (on Unix) SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
