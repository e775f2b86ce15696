//! Service health check command

use anyhow::{Context, Result};
use diarisk_core::{HttpPredictionClient, PredictionClient};
use tracing::info;

/// Ask the prediction service whether it is running
pub async fn ping_command(config_loader: crate::config::CliConfigLoader) -> Result<()> {
    let service_config = config_loader.load().await?;
    let client = HttpPredictionClient::new(&service_config)?;
    info!("Checking prediction service at {}", service_config.base_url);

    let status = client
        .health()
        .await
        .with_context(|| format!("Prediction service at {} is not reachable", service_config.base_url))?;

    println!("{}", status.message);
    Ok(())
}
