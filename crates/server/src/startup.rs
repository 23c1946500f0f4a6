use std::sync::Arc;

use axum::Router;
use configs::{AppConfig, StorageBackend};
use service::student::SeaOrmStudentRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Wire the configured storage backend into handler state.
/// The database backend connects and applies migrations first.
pub async fn build_state(cfg: &AppConfig) -> anyhow::Result<AppState> {
    match cfg.storage.backend {
        StorageBackend::Memory => {
            info!(event = "storage_ready", backend = "memory", "using in-memory student store");
            Ok(AppState::memory())
        }
        StorageBackend::Database => {
            let db = models::db::connect_and_migrate(&cfg.database).await?;
            info!(event = "storage_ready", backend = "database", "using database student store");
            Ok(AppState::with_repository(Arc::new(SeaOrmStudentRepository::new(db))))
        }
    }
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Public entry: build the app for a validated configuration and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app: Router = routes::build_router(state, build_cors());

    let listener = tokio::net::TcpListener::bind((cfg.server.host.as_str(), cfg.server.port)).await?;
    let addr = listener.local_addr()?;
    info!(%addr, backend = ?cfg.storage.backend, "Server running on port {}", addr.port());
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
