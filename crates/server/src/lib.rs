pub mod config;
pub mod error;
pub mod routes;
pub mod telemetry;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

pub use config::{LogFormat, ServerConfig};
pub use error::ApiError;
pub use routes::router;

/// Bind and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app = router(&config);
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    info!("Expense extraction server listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C, running until killed: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
