//! One labelled input row of the form

use crate::interactive::theme::Theme;
use iocraft::prelude::*;

/// Width of the label column, fits the longest label plus the focus marker
pub const LABEL_WIDTH: u16 = 38;
/// Cells used by a slider gauge
pub const GAUGE_WIDTH: usize = 20;

#[derive(Default, Props)]
pub struct FieldRowProps {
    pub label: String,
    /// Text in the numeric box
    pub value: String,
    /// Slider gauge or radio buttons
    pub control: String,
    pub caption: String,
    pub focused: bool,
    /// The box holds text that does not parse
    pub invalid: bool,
    pub theme: Theme,
}

/// Label, numeric box and slider of one field
#[component]
pub fn FieldRow(props: &FieldRowProps) -> impl Into<AnyElement<'static>> {
    let theme = props.theme;
    let marker = if props.focused { "▸ " } else { "  " };
    let label_color = if props.focused { theme.primary } else { theme.text };
    let value_color = if props.invalid {
        theme.danger
    } else if props.focused {
        theme.primary
    } else {
        theme.text
    };
    let control_color = if props.focused { theme.primary } else { theme.muted };

    element! {
        View(flex_direction: FlexDirection::Row) {
            View(width: LABEL_WIDTH) {
                Text(
                    content: format!("{}{}", marker, props.label),
                    color: Theme::color(label_color),
                    weight: if props.focused { Weight::Bold } else { Weight::Normal },
                )
            }
            View(width: 12) {
                Text(content: format!("[{:>8}]", props.value), color: Theme::color(value_color))
            }
            View(margin_left: 1) {
                Text(content: props.control.clone(), color: Theme::color(control_color))
            }
            View(margin_left: 1) {
                Text(content: props.caption.clone(), color: Theme::color(theme.muted))
            }
        }
    }
}
