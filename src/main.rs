use anyhow::Result;
use configs_core::{config::Config, server, telemetry};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;

    // Initialize logging, metrics, and tracing
    let prometheus_handle = telemetry::init(&config.telemetry)?;

    info!("Starting Configs Core Service");
    info!("HTTP server listening on {}", config.http_addr());

    // Run the server
    server::run(config, prometheus_handle).await
}
