use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use super::router::{AppState, create_router};
use crate::application::services::TaskService;
use crate::infrastructure::database::DatabaseManager;
use crate::infrastructure::repositories::SqliteTaskRepository;
use crate::utils::config::AppConfig;

/// Opens the database, wires the services and serves HTTP until Ctrl-C
pub async fn run_server(config: AppConfig) -> Result<()> {
    let db = DatabaseManager::new(&config.db_file)?;
    db.initialize_database()
        .await
        .context("Failed to initialize database schema")?;
    info!("Using database {}", config.db_file.display());

    let task_repo = Arc::new(SqliteTaskRepository::new(db));
    let state = AppState {
        task_service: Arc::new(TaskService::new(task_repo)),
    };

    if !config.web_dir.is_dir() {
        warn!(
            "Web directory {} does not exist, static files will not be served",
            config.web_dir.display()
        );
    }
    let app = create_router(state, &config.web_dir);

    let listener = TcpListener::bind(config.bind_addr())
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;
    info!("Server listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
