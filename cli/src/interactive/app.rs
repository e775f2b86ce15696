//! Interactive application entry point

use crate::interactive::components::{FormContext, Shell};
use crate::interactive::theme::Theme;
use anyhow::{bail, Result};
use crossterm::tty::IsTty;
use diarisk_core::ServiceConfig;
use iocraft::prelude::*;
use tracing::info;

/// Capacity of the UI event channel
const UI_CHANNEL_CAPACITY: usize = 64;

/// Run the interactive form until the user quits
pub async fn run_interactive(service: ServiceConfig) -> Result<()> {
    if !std::io::stdout().is_tty() {
        bail!("Interactive mode needs a terminal; use `diarisk predict` instead");
    }

    info!("Starting interactive form against {}", service.base_url);

    let (ui_sender, _) = tokio::sync::broadcast::channel(UI_CHANNEL_CAPACITY);
    let context = FormContext {
        service,
        ui_sender,
        theme: Theme::default(),
    };

    // Run the iocraft-based UI
    tokio::task::spawn_blocking(move || {
        smol::block_on(async move {
            element!(Shell(context: context)).render_loop().await
        })
    })
    .await??;

    info!("Interactive form closed");
    Ok(())
}
