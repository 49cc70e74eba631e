//! API server implementation

use std::future::Future;
use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

use crate::{AppState, Error, Result, ServerConfig, routes};

/// Savings Calculator API server.
///
/// Owns the stores for its whole lifetime: they are created in [`Server::new`]
/// and dropped when [`Server::serve`] returns.
#[derive(Debug)]
pub struct Server {
    config: ServerConfig,
    state: AppState,
}

impl Server {
    /// Create a server and its stores from `config`.
    pub fn new(config: ServerConfig) -> Result<Self> {
        config.validate()?;
        let projects = if config.seed_demo_projects {
            savings_core::demo_projects()
        } else {
            Vec::new()
        };
        let state = AppState::new(config.initial_settings(), projects);
        tracing::debug!(projects = state.projects.len(), "Stores initialized");
        Ok(Self { config, state })
    }

    /// Configuration the server was built with.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Shared store handles.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Router bound to this server's stores.
    pub fn router(&self) -> Router {
        routes::router(self.state.clone())
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener> {
        let addr = self.config.bind_addr();
        TcpListener::bind(&addr)
            .await
            .map_err(|e| Error::config(format!("Failed to bind {addr}: {e}")))
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let local: Option<SocketAddr> = listener.local_addr().ok();
        tracing::info!(addr = ?local, "Server listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!(
            projects = self.state.projects.len(),
            "Server stopped; in-memory state discarded"
        );
        Ok(())
    }

    /// Bind and serve until Ctrl-C.
    pub async fn run(self) -> Result<()> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => {
            tracing::warn!("Failed to listen for shutdown signal: {e}");
            std::future::pending::<()>().await;
        }
    }
}
