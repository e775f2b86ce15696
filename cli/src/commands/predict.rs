//! One-shot prediction command

use crate::interactive::theme::Theme;
use crate::output::terminal::{write_prediction, StdoutOutput};
use anyhow::{anyhow, Context, Result};
use clap::Args;
use diarisk_core::{
    Field, FormState, HttpPredictionClient, InputRecord, ResultView, SUBMISSION_FAILED_MESSAGE,
};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Arguments of `diarisk predict`
#[derive(Args, Debug, Default)]
pub struct PredictArgs {
    /// JSON object of field values applied over the defaults
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Set one field, e.g. `--set age=52` (repeatable, applied after --input)
    #[arg(short, long = "set", value_name = "FIELD=VALUE")]
    pub sets: Vec<String>,

    /// Print the raw prediction as JSON instead of the results panel
    #[arg(long)]
    pub json: bool,
}

/// Submit one record and print the prediction
pub async fn predict_command(
    config_loader: crate::config::CliConfigLoader,
    args: PredictArgs,
) -> Result<()> {
    let mut record = InputRecord::default();
    if let Some(path) = &args.input {
        apply_input_file(&mut record, path).await?;
    }
    for assignment in &args.sets {
        apply_assignment(&mut record, assignment)?;
    }

    let service_config = config_loader.load().await?;
    let client = HttpPredictionClient::new(&service_config)?;
    info!("Using prediction service at {}", service_config.base_url);

    let mut form = FormState::with_record(record);
    form.submit(&client).await?;

    if form.error().is_some() {
        return Err(anyhow!(SUBMISSION_FAILED_MESSAGE));
    }
    let result = form
        .result()
        .ok_or_else(|| anyhow!(SUBMISSION_FAILED_MESSAGE))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        write_prediction(&StdoutOutput, &ResultView::new(result), &Theme::default());
    }
    Ok(())
}

/// Apply a `FIELD=VALUE` assignment with text-box semantics
fn apply_assignment(record: &mut InputRecord, assignment: &str) -> Result<()> {
    let (name, value) = assignment
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected FIELD=VALUE, got '{}'", assignment))?;
    let field = lookup_field(name.trim())?;
    record
        .set_text(field, value)
        .with_context(|| format!("Invalid value for {}", field.key()))?;
    Ok(())
}

/// Apply every entry of a JSON object file
async fn apply_input_file(record: &mut InputRecord, path: &Path) -> Result<()> {
    debug!("Reading input record from {}", path.display());
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;
    let value: Value = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))?;
    apply_input_value(record, &value)
}

fn apply_input_value(record: &mut InputRecord, value: &Value) -> Result<()> {
    let entries = value
        .as_object()
        .ok_or_else(|| anyhow!("Input file must contain a JSON object"))?;

    for (name, raw) in entries {
        let field = lookup_field(name)?;
        let text = match raw {
            Value::Number(n) => n.to_string(),
            Value::String(s) => s.clone(),
            other => return Err(anyhow!("Unsupported value for {}: {}", name, other)),
        };
        record
            .set_text(field, &text)
            .with_context(|| format!("Invalid value for {}", field.key()))?;
    }
    Ok(())
}

fn lookup_field(name: &str) -> Result<Field> {
    Field::lookup(name).ok_or_else(|| anyhow!("Unknown field: {}", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use diarisk_core::Sex;
    use serde_json::json;

    #[test]
    fn test_assignment_applies_text_edit() {
        let mut record = InputRecord::default();
        apply_assignment(&mut record, "age=61").unwrap();
        apply_assignment(&mut record, "sex=female").unwrap();
        apply_assignment(&mut record, "calories=").unwrap();

        assert_eq!(record.number(Field::Age), Some(61.0));
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.number(Field::Calories), Some(0.0));
    }

    #[test]
    fn test_assignment_errors() {
        let mut record = InputRecord::default();
        assert!(apply_assignment(&mut record, "age").is_err());
        assert!(apply_assignment(&mut record, "height=180").is_err());
        assert!(apply_assignment(&mut record, "age=old").is_err());
        assert_eq!(record, InputRecord::default());
    }

    #[test]
    fn test_input_object_accepts_wire_names() {
        let mut record = InputRecord::default();
        apply_input_value(
            &mut record,
            &json!({"Age": 45, "Sex_encoded": 1, "alcoholic_drinks": "2.5"}),
        )
        .unwrap();

        assert_eq!(record.number(Field::Age), Some(45.0));
        assert_eq!(record.sex, Sex::Female);
        assert_eq!(record.number(Field::AlcoholicDrinks), Some(2.5));
    }

    #[test]
    fn test_input_must_be_object() {
        let mut record = InputRecord::default();
        assert!(apply_input_value(&mut record, &json!([1, 2])).is_err());
        assert!(apply_input_value(&mut record, &json!({"age": true})).is_err());
    }
}
