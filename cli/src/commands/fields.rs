//! Field catalogue command

use crate::output::terminal::{write_fields, StdoutOutput};
use anyhow::Result;
use diarisk_core::InputRecord;

/// Print every input field with its wire name, default and slider range
pub async fn fields_command() -> Result<()> {
    write_fields(&StdoutOutput, &InputRecord::default());
    Ok(())
}
