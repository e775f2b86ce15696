//! Interactive mode command

use crate::interactive::app::run_interactive;
use anyhow::Result;
use tracing::debug;

/// Start the interactive prediction form
pub async fn interactive_command(config_loader: crate::config::CliConfigLoader) -> Result<()> {
    let service_config = config_loader.load().await?;
    debug!("Using prediction service at {}", service_config.base_url);

    run_interactive(service_config).await
}
