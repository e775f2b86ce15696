//! Messages broadcast between the prediction task and the form components

use diarisk_core::PredictionResult;
use uuid::Uuid;

/// UI events of one submission
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A request left for the service
    PredictionStarted { submission_id: Uuid, endpoint: String },
    /// The service answered with a classification
    PredictionCompleted {
        submission_id: Uuid,
        result: PredictionResult,
    },
    /// The request failed; `reason` goes to the log only
    PredictionFailed { submission_id: Uuid, reason: String },
}

impl AppMessage {
    pub fn submission_id(&self) -> Uuid {
        match self {
            AppMessage::PredictionStarted { submission_id, .. }
            | AppMessage::PredictionCompleted { submission_id, .. }
            | AppMessage::PredictionFailed { submission_id, .. } => *submission_id,
        }
    }

    /// Whether this message ends a submission
    pub fn is_outcome(&self) -> bool {
        !matches!(self, AppMessage::PredictionStarted { .. })
    }
}
