mod client;
mod config;
mod constants;
mod error;
mod formatters;
mod models;
mod service;
mod stations;
#[cfg(test)]
mod test_support;
mod weather_codes;

use anyhow::Result;
use rmcp::ServiceExt;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::service::Weather;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_metoffice_weather=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    tracing::info!(
        "Starting MCP Met Office weather server (stations: {})",
        config.stations_path.display()
    );

    let weather = Weather::new(config)?;
    let server = weather.serve(rmcp::transport::stdio()).await?;
    server.waiting().await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}
