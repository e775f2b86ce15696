//! Submission status line
//!
//! Shows a spinner, the elapsed time and the target service while a
//! prediction request is outstanding.

use crate::interactive::message_handler::AppMessage;
use crate::interactive::theme::Theme;
use iocraft::prelude::*;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL: Duration = Duration::from_millis(80);

#[derive(Clone, Props)]
pub struct DynamicStatusLineProps {
    pub context: StatusLineContext,
}

impl Default for DynamicStatusLineProps {
    fn default() -> Self {
        Self {
            context: StatusLineContext {
                ui_sender: tokio::sync::broadcast::channel(1).0,
                theme: Theme::default(),
            },
        }
    }
}

/// Context for the status line component
#[derive(Debug, Clone)]
pub struct StatusLineContext {
    pub ui_sender: broadcast::Sender<AppMessage>,
    pub theme: Theme,
}

/// Text of the status line for one spinner frame
pub fn status_text(frame: usize, elapsed_secs: u64, endpoint: &str) -> String {
    format!(
        "{} Calculating… ({}s · {})",
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()],
        elapsed_secs,
        endpoint
    )
}

/// Submission the spinner follows after seeing `message`
///
/// A start always takes over. An outcome only stops the spinner when it
/// belongs to the followed submission.
pub fn tracked_submission(current: Option<Uuid>, message: &AppMessage) -> Option<Uuid> {
    match message {
        AppMessage::PredictionStarted { submission_id, .. } => Some(*submission_id),
        outcome if current == Some(outcome.submission_id()) => None,
        _ => current,
    }
}

/// Dynamic Status Line Component (isolated so spinner ticks don't re-render the form)
#[component]
pub fn DynamicStatusLine(
    mut hooks: Hooks,
    props: &DynamicStatusLineProps,
) -> impl Into<AnyElement<'static>> {
    let tracked = hooks.use_state(|| None::<Uuid>);
    let endpoint = hooks.use_state(String::new);
    let start_time = hooks.use_state(Instant::now);
    let frame = hooks.use_state(|| 0usize);

    // Subscribe to UI events (clone only the sender to avoid non-Send context capture)
    let ui_sender = props.context.ui_sender.clone();
    let mut tracked_clone = tracked;
    let mut endpoint_clone = endpoint;
    let mut start_time_clone = start_time;
    hooks.use_future(async move {
        let mut rx = ui_sender.subscribe();
        loop {
            let message = match rx.recv().await {
                Ok(message) => message,
                Err(RecvError::Lagged(_)) => continue,
                Err(RecvError::Closed) => break,
            };
            if let AppMessage::PredictionStarted { endpoint, .. } = &message {
                endpoint_clone.set(endpoint.clone());
                start_time_clone.set(Instant::now());
            }
            tracked_clone.set(tracked_submission(tracked_clone.get(), &message));
        }
    });

    // Spinner ticks only while a request is out
    let tracked_tick = tracked;
    let mut frame_clone = frame;
    hooks.use_future(async move {
        loop {
            smol::Timer::after(SPINNER_INTERVAL).await;
            if tracked_tick.get().is_some() {
                frame_clone.set(frame_clone.get().wrapping_add(1));
            }
        }
    });

    if tracked.get().is_none() {
        return element! { View {} };
    }

    let text = status_text(
        frame.get(),
        start_time.read().elapsed().as_secs(),
        &endpoint.read(),
    );

    element! {
        View(padding_left: 1) {
            Text(content: text, color: Theme::color(props.context.theme.secondary), weight: Weight::Bold)
        }
    }
}
