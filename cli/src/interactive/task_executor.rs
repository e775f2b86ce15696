//! Prediction task execution for interactive mode
//!
//! The network call runs on a tokio task; its outcome reaches the form as an
//! [`AppMessage`] so the render loop never blocks on the service.

use crate::interactive::message_handler::AppMessage;
use diarisk_core::{HttpPredictionClient, PredictionClient, ServiceConfig, Submission};
use tokio::sync::broadcast;
use tracing::debug;

/// Send one submission and broadcast its outcome
pub async fn execute_prediction(
    client: &dyn PredictionClient,
    submission: Submission,
    ui_sender: &broadcast::Sender<AppMessage>,
) {
    let submission_id = submission.id;
    let message = match client.predict(&submission.request).await {
        Ok(result) => AppMessage::PredictionCompleted {
            submission_id,
            result,
        },
        Err(e) => AppMessage::PredictionFailed {
            submission_id,
            reason: e.to_string(),
        },
    };
    if ui_sender.send(message).is_err() {
        debug!(submission = %submission_id, "No listener left for prediction outcome");
    }
}

/// Spawn a prediction task and broadcast UI events
pub fn spawn_prediction(
    service: ServiceConfig,
    submission: Submission,
    ui_sender: broadcast::Sender<AppMessage>,
) {
    let _ = ui_sender.send(AppMessage::PredictionStarted {
        submission_id: submission.id,
        endpoint: service.base_url.clone(),
    });

    tokio::spawn(async move {
        match HttpPredictionClient::new(&service) {
            Ok(client) => execute_prediction(&client, submission, &ui_sender).await,
            Err(e) => {
                let _ = ui_sender.send(AppMessage::PredictionFailed {
                    submission_id: submission.id,
                    reason: e.to_string(),
                });
            }
        }
    });
}
