//! Serves the kanban board API.
//!
//! Settings come from the environment, optionally seeded from a `.env` file
//! in the working directory. With `KANBAN_STORAGE=memory` no database is
//! needed and all state is lost on exit.

use kanban::board::adapters::memory::InMemoryBoardRepository;
use kanban::board::adapters::postgres::{GatewayError, PersistenceGateway};
use kanban::board::ports::BoardRepository;
use kanban::board::services::BoardService;
use kanban::config::{Settings, StorageMode};
use kanban::http::{AppState, create_router};
use kanban::telemetry::init_tracing;
use mockable::DefaultClock;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{error, info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_outcome = dotenvy::dotenv();
    init_tracing()?;
    match dotenv_outcome {
        Ok(path) => info!(path = %path.display(), "loaded environment file"),
        Err(err) if err.not_found() => {}
        Err(err) => warn!(error = %err, "ignoring unreadable environment file"),
    }

    let settings = Settings::from_env()?;
    info!(database = ?settings.database, storage = ?settings.storage, "configuration loaded");

    let repository = open_repository(&settings).await?;
    let service = BoardService::new(repository, Arc::new(DefaultClock))
        .with_read_delay(settings.read_delay);
    let router = create_router(AppState::new(Arc::new(service)));

    let listener = TcpListener::bind(settings.bind_addr).await?;
    info!(addr = %settings.bind_addr, "kanban server listening");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("kanban server stopped");
    Ok(())
}

async fn open_repository(settings: &Settings) -> Result<Arc<dyn BoardRepository>, BoxError> {
    match settings.storage {
        StorageMode::Memory => {
            warn!("using in-memory storage; the board is lost on exit");
            Ok(Arc::new(InMemoryBoardRepository::new()))
        }
        StorageMode::Postgres => {
            let database = settings.database.clone();
            let gateway = tokio::task::spawn_blocking(move || {
                let connected = PersistenceGateway::connect(&database)?;
                connected.ensure_schema()?;
                Ok::<_, GatewayError>(connected)
            })
            .await??;
            Ok(Arc::new(gateway.repository()))
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
