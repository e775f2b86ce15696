//! Results and error panels

use crate::interactive::theme::Theme;
use diarisk_core::render::ScrollWindow;
use diarisk_core::ResultView;
use iocraft::prelude::*;

#[derive(Default, Props)]
pub struct ResultPanelProps {
    pub view: Option<ResultView>,
    /// Visible part of the feature list
    pub scroll: ScrollWindow,
    pub error: Option<String>,
    pub theme: Theme,
}

/// Error panel above the latest result; either may be absent
#[component]
pub fn ResultPanel(props: &ResultPanelProps) -> impl Into<AnyElement<'static>> {
    let theme = props.theme;

    let error_panel = props.error.clone().map(|message| {
        element! {
            View(
                border_style: theme.border_style(),
                border_color: Theme::color(theme.danger),
                background_color: Theme::color(theme.error_tint),
                padding_left: 1,
                padding_right: 1,
                margin_bottom: 1,
            ) {
                Text(content: message, color: Theme::color(theme.danger), weight: Weight::Bold)
            }
        }
    });

    let result_panel = props.view.as_ref().map(|view| {
        let risk_color = Theme::color(theme.risk_color(view.risk.is_high()));
        let (more_above, more_below) = props.scroll.has_more(view.feature_lines.len());
        let visible: Vec<String> = props.scroll.visible(&view.feature_lines).to_vec();

        element! {
            View(
                flex_direction: FlexDirection::Column,
                border_style: theme.border_style(),
                border_color: Theme::color(theme.primary),
                padding_left: 1,
                padding_right: 1,
            ) {
                Text(content: "Prediction Results", color: Theme::color(theme.primary), weight: Weight::Bold)
                View(margin_top: 1, margin_bottom: 1) {
                    Text(content: view.headline.clone(), color: risk_color, weight: Weight::Bold)
                }
                Text(content: "Model Details:", color: Theme::color(theme.text), weight: Weight::Bold)
                Text(content: view.binary_line.clone(), color: Theme::color(theme.text))
                Text(content: view.confidence_line.clone(), color: Theme::color(theme.text))
                Text(content: view.raw_probabilities_line.clone(), color: Theme::color(theme.text))
                View(margin_top: 1) {
                    Text(content: "Scaled Feature Values:", color: Theme::color(theme.text), weight: Weight::Bold)
                }
                #(if more_above {
                    Some(element! { Text(content: "  ▲ more (PgUp)", color: Theme::color(theme.muted)) })
                } else {
                    None
                })
                #(visible.into_iter().map(|line| element! {
                    Text(content: format!("  {}", line), color: Theme::color(theme.text))
                }).collect::<Vec<_>>())
                #(if more_below {
                    Some(element! { Text(content: "  ▼ more (PgDn)", color: Theme::color(theme.muted)) })
                } else {
                    None
                })
                View(margin_top: 1) {
                    Text(content: view.advice.clone(), color: risk_color)
                }
            }
        }
    });

    element! {
        View(flex_direction: FlexDirection::Column) {
            #(error_panel)
            #(result_panel)
        }
    }
}
