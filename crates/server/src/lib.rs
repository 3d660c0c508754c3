//! Chatgate server library.
//!
//! Provides a reusable server function to serve Chatgate either for the binary, or for the integration tests.

#![deny(missing_docs)]

mod health;

use std::net::SocketAddr;

use anyhow::{anyhow, bail};
use axum::routing::get;
use config::Config;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

/// Paths owned by the LLM router.
const RESERVED_PATHS: &[&str] = &["/chat", "/models"];

/// Configuration for serving Chatgate.
pub struct ServeConfig {
    /// The socket address (IP and port) the server will bind to
    pub listen_address: SocketAddr,
    /// The deserialized Chatgate configuration.
    pub config: Config,
    /// Cancel to stop accepting connections and drain the in-flight requests.
    pub shutdown_signal: CancellationToken,
}

/// Starts and runs the Chatgate server with the provided configuration.
pub async fn serve(
    ServeConfig {
        listen_address,
        config,
        shutdown_signal,
    }: ServeConfig,
) -> anyhow::Result<()> {
    let mut app = llm::router(&config.llm)?;

    // Health endpoint never touches the upstream provider.
    if config.server.health.enabled {
        let path: &str = &config.server.health.path;

        if !path.starts_with('/') {
            bail!("Health endpoint path must start with '/', got '{path}'");
        }

        if RESERVED_PATHS.contains(&path) {
            bail!("Health endpoint path '{path}' collides with an API route");
        }

        app = app.route(path, get(health::health));
    } else {
        log::debug!("Health endpoint disabled");
    }

    let listener = TcpListener::bind(listen_address)
        .await
        .map_err(|e| anyhow!("Failed to bind to {listen_address}: {e}"))?;

    let local_address = listener.local_addr()?;

    log::info!("Chat endpoint available at: http://{local_address}/chat");
    log::info!("Models endpoint available at: http://{local_address}/models");

    if config.server.health.enabled {
        log::info!(
            "Health endpoint available at: http://{local_address}{}",
            config.server.health.path
        );
    }

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(async move { shutdown_signal.cancelled().await })
        .await
        .map_err(|e| anyhow!("Failed to start HTTP server: {e}"))?;

    log::info!("Server stopped");

    Ok(())
}
