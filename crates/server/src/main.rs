use anyhow::Context;
use reimburse_server::{serve, telemetry, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::from_env().context("Failed to load server configuration")?;
    telemetry::init_tracing(&config)?;
    serve(config).await
}
