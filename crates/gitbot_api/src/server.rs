//! Webhook server: binds the listener for `/callback` and the info pages and
//! runs until the process is asked to stop.
//!
//! [`shutdown_signal`] is shared with `gitbot console`, so both modes stop on
//! the same signals. In-flight deliveries are answered before the server
//! exits.

use std::future::Future;
use std::net::{IpAddr, SocketAddr};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use crate::{routes, AppState, DEFAULT_HOST, DEFAULT_PORT};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// Where the webhook server listens. `host` must be an IP address.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ApiConfig {
    /// # Errors
    ///
    /// Fails when `host` is not an IP address.
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .host
            .parse()
            .with_context(|| format!("Invalid listen address '{}'", self.host))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Webhook server bound to one [`AppState`].
pub struct ApiServer {
    config: ApiConfig,
    state: AppState,
}

impl ApiServer {
    pub fn new(config: ApiConfig, state: AppState) -> Self {
        Self { config, state }
    }

    /// Routes with their middleware, ready to serve.
    pub fn router(&self) -> Router {
        routes::create_router(self.state.clone())
    }

    /// Serves webhook deliveries until SIGINT or SIGTERM.
    ///
    /// # Errors
    ///
    /// Fails when the address is invalid or cannot be bound.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.socket_addr()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {addr}"))?;

        self.serve_until(listener, shutdown_signal()).await
    }

    /// Serves on an already bound `listener` until `shutdown` completes.
    pub async fn serve_until<S>(self, listener: TcpListener, shutdown: S) -> anyhow::Result<()>
    where
        S: Future<Output = ()> + Send + 'static,
    {
        let local_addr = listener.local_addr()?;
        info!(address = %local_addr, "Listening for webhook deliveries on /callback");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .context("Webhook server failed")?;

        info!(address = %local_addr, "Webhook server stopped");
        Ok(())
    }
}

/// Completes on CTRL+C, or on SIGTERM where the platform has it.
pub async fn shutdown_signal() {
    let interrupt = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let received = tokio::select! {
        _ = interrupt => "SIGINT",
        _ = terminate => "SIGTERM",
    };
    info!(signal = received, "Shutting down");
}
