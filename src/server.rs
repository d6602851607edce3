//! Console server: configuration, shared state, and the serve loop.

use crate::client::{BackendClient, BackendClientConfig};
use crate::error::{ConsoleError, Result};
use crate::routes::create_router;
use crate::templates::Templates;
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Configuration for the console server.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Address to listen on.
    pub listen_addr: SocketAddr,
    /// Base URL of the database administration API.
    pub api_url: String,
    /// Backend request timeout in milliseconds.
    pub http_timeout_ms: u64,
    /// TTL for the table-listing cache in milliseconds.
    pub cache_ttl_ms: u64,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            api_url: "http://localhost:8000".to_string(),
            http_timeout_ms: 10_000,
            cache_ttl_ms: 2_000,
        }
    }
}

/// Shared state for the console server.
#[derive(Clone)]
pub struct ConsoleState {
    /// Configuration.
    pub config: ConsoleConfig,
    /// HTTP client for the administration API.
    pub client: Arc<BackendClient>,
    /// Template renderer.
    pub templates: Arc<Templates>,
    /// Shutdown signal.
    shutdown_tx: broadcast::Sender<()>,
}

impl ConsoleState {
    /// Create a new console state.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        let client_config = BackendClientConfig {
            base_url: config.api_url.clone(),
            timeout_ms: config.http_timeout_ms,
            cache_ttl_ms: config.cache_ttl_ms,
        };
        let client = Arc::new(
            BackendClient::new(client_config)
                .map_err(|e| ConsoleError::config("api_url", e.to_string()))?,
        );
        let templates = Arc::new(Templates::new());
        let (shutdown_tx, _) = broadcast::channel(1);

        Ok(Self {
            config,
            client,
            templates,
            shutdown_tx,
        })
    }

    /// Get a shutdown receiver.
    pub fn shutdown_rx(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Trigger shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

impl std::fmt::Debug for ConsoleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Console server.
pub struct ConsoleServer {
    state: ConsoleState,
}

impl ConsoleServer {
    /// Create a new console server.
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        Ok(Self {
            state: ConsoleState::new(config)?,
        })
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        create_router(self.state.clone())
    }

    /// Run the console server until shutdown is triggered.
    pub async fn run(self) -> Result<()> {
        let addr = self.state.config.listen_addr;
        let router = self.router();

        tracing::info!("Console listening on http://{}", addr);
        tracing::info!("Proxying to backend at {}", self.state.config.api_url);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ConsoleError::bind_failed(addr, e.to_string()))?;
        axum::serve(listener, router)
            .with_graceful_shutdown(async move {
                let mut rx = self.state.shutdown_rx();
                tokio::select! {
                    _ = rx.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                tracing::info!("Console shutting down");
            })
            .await?;

        Ok(())
    }

    /// Get the state for testing.
    pub fn state(&self) -> ConsoleState {
        self.state.clone()
    }
}
