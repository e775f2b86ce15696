//! Application shell: title bar, the form and the footer

use crate::interactive::components::prediction_form::{FormContext, PredictionForm};
use crate::interactive::theme::Theme;
use chrono::Datelike;
use iocraft::prelude::*;

/// Footer line for `year`
pub fn footer_text(year: i32) -> String {
    format!(
        "© {} Diabetes Risk Prediction Tool | Disclaimer: This tool is for informational purposes only and not a substitute for medical advice.",
        year
    )
}

const KEY_HINTS: &str =
    "Tab/↑↓ move · ←→ adjust (Shift ×10) · type to edit · Enter submit · PgUp/PgDn scroll · Esc quit";

#[derive(Clone, Default, Props)]
pub struct ShellProps {
    pub context: FormContext,
}

/// Root component of the interactive form
#[component]
pub fn Shell(mut hooks: Hooks, props: &ShellProps) -> impl Into<AnyElement<'static>> {
    let mut system = hooks.use_context_mut::<SystemContext>();
    let should_exit = hooks.use_state(|| false);
    let theme = props.context.theme;

    hooks.use_terminal_events({
        let mut should_exit = should_exit;
        move |event| match event {
            TerminalEvent::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) if kind != KeyEventKind::Release => match code {
                KeyCode::Esc => should_exit.set(true),
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    should_exit.set(true)
                }
                _ => {}
            },
            _ => {}
        }
    });

    if should_exit.get() {
        system.exit();
    }

    element! {
        View(
            flex_direction: FlexDirection::Column,
            width: 100pct,
            background_color: Theme::color(theme.background),
        ) {
            View(
                background_color: Theme::color(theme.primary),
                padding_left: 1,
                padding_right: 1,
                margin_bottom: 1,
            ) {
                Text(content: "Diabetes Risk Prediction App", color: Color::White, weight: Weight::Bold)
            }
            PredictionForm(key: "prediction-form", context: props.context.clone())
            View(margin_top: 1, flex_direction: FlexDirection::Column) {
                Text(content: KEY_HINTS, color: Theme::color(theme.muted))
                Text(content: footer_text(chrono::Local::now().year()), color: Theme::color(theme.muted))
            }
        }
    }
}
