//! HTTP server initialization and runtime setup.
//!
//! Handles the database pool, service wiring and the Axum server lifecycle.

use crate::application::services::AliasService;
use crate::config::Config;
use crate::infrastructure::database;
use crate::infrastructure::persistence::SqliteAliasRepository;
use crate::routes::app_router;
use crate::state::{AppState, Credentials};
use crate::utils::alias_generator::RandomAliasGenerator;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - Apply migrations
/// - Alias service
/// - Axum HTTP server
///
/// Returns once a shutdown signal has been received and in-flight requests
/// have drained.
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = database::connect(&config).await?;
    tracing::info!("Connected to database");

    database::migrate(&pool).await?;

    let repository = Arc::new(SqliteAliasRepository::new(Arc::new(pool.clone())));
    let generator = Arc::new(RandomAliasGenerator::new(config.alias_length));
    let alias_service = Arc::new(AliasService::new(
        repository,
        generator,
        config.alias_max_attempts,
    ));

    let credentials = Credentials {
        user: config.http_user.clone(),
        password: config.http_password.clone(),
    };
    let state = AppState::new(alias_service, credentials);

    let app = app_router(state, config.request_timeout());

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    tracing::info!("Server stopped");

    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
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
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
