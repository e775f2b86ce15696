//! Terminal output abstraction and formatting utilities
//!
//! Used by the one-shot commands; the interactive form renders through iocraft.

use diarisk_core::record::{Field, FieldKind, InputRecord};
use diarisk_core::ResultView;
use unicode_width::UnicodeWidthStr;

use crate::interactive::theme::Theme;

/// Trait to abstract over output destinations
pub trait OutputHandle {
    fn println<S: ToString>(&self, msg: S);
}

/// Plain process stdout
pub struct StdoutOutput;

impl OutputHandle for StdoutOutput {
    fn println<S: ToString>(&self, msg: S) {
        println!("{}", msg.to_string());
    }
}

/// ANSI color codes for terminal output
#[derive(Debug, Clone, Copy)]
pub enum AnsiColor {
    Gray,
    Bold,
}

/// Apply ANSI color formatting to text
pub fn apply_color(text: &str, color: AnsiColor) -> String {
    match color {
        AnsiColor::Gray => format!("\x1b[90m{}\x1b[0m", text),
        AnsiColor::Bold => format!("\x1b[1m{}\x1b[0m", text),
    }
}

/// Apply RGB color formatting to text
pub fn apply_rgb_color(text: &str, rgb: (u8, u8, u8)) -> String {
    format!("\x1b[38;2;{};{};{}m{}\x1b[0m", rgb.0, rgb.1, rgb.2, text)
}

/// Pad `text` with spaces to `width` display columns
pub fn pad_to_width(text: &str, width: usize) -> String {
    let current = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(current)))
}

/// Print the results panel of a prediction
pub fn write_prediction<T: OutputHandle>(out: &T, view: &ResultView, theme: &Theme) {
    let headline_color = theme.risk_color(view.risk.is_high());

    out.println(apply_rgb_color("Prediction Results", theme.primary));
    out.println(apply_color(&apply_rgb_color(&view.headline, headline_color), AnsiColor::Bold));
    out.println("");
    out.println(apply_color("Model Details:", AnsiColor::Bold));
    out.println(&view.binary_line);
    out.println(&view.confidence_line);
    out.println(&view.raw_probabilities_line);
    out.println("");
    out.println(apply_color("Scaled Feature Values:", AnsiColor::Bold));
    for line in &view.feature_lines {
        out.println(format!("  {}", line));
    }
    out.println("");
    out.println(&view.advice);
}

/// Print the field catalogue as a table, with current values from `record`
pub fn write_fields<T: OutputHandle>(out: &T, record: &InputRecord) {
    let key_width = Field::ALL
        .iter()
        .map(|f| UnicodeWidthStr::width(f.key()))
        .max()
        .unwrap_or(0);
    let wire_width = Field::ALL
        .iter()
        .map(|f| UnicodeWidthStr::width(f.wire_name()))
        .max()
        .unwrap_or(0);

    out.println(apply_color(
        &format!(
            "{}  {}  {}  {}",
            pad_to_width("FIELD", key_width),
            pad_to_width("WIRE NAME", wire_width),
            pad_to_width("DEFAULT", 8),
            "RANGE"
        ),
        AnsiColor::Bold,
    ));

    for field in Field::ALL {
        let spec = field.spec();
        let range = match spec.kind {
            FieldKind::Numeric { range, .. } => {
                let unit = if spec.unit.is_empty() {
                    String::new()
                } else {
                    format!(" {}", spec.unit)
                };
                format!("{}..{} step {}{}", range.min, range.max, range.step, unit)
            }
            FieldKind::Categorical => "0 = male, 1 = female".to_string(),
        };
        out.println(format!(
            "{}  {}  {}  {}",
            pad_to_width(spec.key, key_width),
            pad_to_width(spec.wire_name, wire_width),
            pad_to_width(&record.display_value(field), 8),
            apply_color(&range, AnsiColor::Gray)
        ));
    }
}
