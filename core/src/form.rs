//! Prediction form state
//!
//! All mutable state of the form lives in one [`FormState`] value owned by
//! the view that renders it. A submission is split into [`FormState::begin_submit`]
//! and [`FormState::finish_submit`] so a view can await the network call
//! elsewhere and still keep at most one request outstanding.

use crate::error::{Error, FieldError, Result, SUBMISSION_FAILED_MESSAGE};
use crate::predict::{PredictionClient, PredictionRequest, PredictionResult};
use crate::record::{Field, InputRecord, Sex};
use tracing::{error, info};
use uuid::Uuid;

/// A submission handed out by [`FormState::begin_submit`]
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Correlates log lines of one request
    pub id: Uuid,
    pub request: PredictionRequest,
}

/// Field values, loading flag, last result and last error of the form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    record: InputRecord,
    loading: bool,
    in_flight: Option<Uuid>,
    result: Option<PredictionResult>,
    error: Option<String>,
}

impl FormState {
    /// Form with default field values
    pub fn new() -> Self {
        Self::default()
    }

    /// Form starting from a prepared record
    pub fn with_record(record: InputRecord) -> Self {
        Self {
            record,
            ..Self::default()
        }
    }

    pub fn record(&self) -> &InputRecord {
        &self.record
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Text-box edit of one field
    pub fn update_text(&mut self, field: Field, raw: &str) -> std::result::Result<(), FieldError> {
        self.record.set_text(field, raw)
    }

    /// Radio selection of the sex field
    pub fn set_sex(&mut self, sex: Sex) {
        self.record.set_sex(sex);
    }

    /// Slider move of one field
    pub fn nudge(&mut self, field: Field, steps: i32) {
        self.record.nudge(field, steps);
    }

    /// Start a submission
    ///
    /// Returns `None` while another submission is in flight; the trigger is
    /// disabled and nothing is sent.
    pub fn begin_submit(&mut self) -> Option<Submission> {
        if self.loading {
            return None;
        }
        let id = Uuid::new_v4();
        self.loading = true;
        self.in_flight = Some(id);
        info!(submission = %id, "Submitting prediction request");
        Some(Submission {
            id,
            request: PredictionRequest::from(&self.record),
        })
    }

    /// Id of the submission currently awaiting its outcome
    pub fn in_flight(&self) -> Option<Uuid> {
        self.in_flight
    }

    /// Record the outcome of the submission started by [`FormState::begin_submit`]
    ///
    /// Success replaces the result and clears the error. Failure shows the
    /// fixed error text and leaves any earlier result visible.
    pub fn finish_submit(&mut self, outcome: Result<PredictionResult>) {
        match outcome {
            Ok(result) => self.complete_submit(result),
            Err(e) => self.fail_submit(&e.to_string()),
        }
    }

    /// Successful half of [`FormState::finish_submit`]
    pub fn complete_submit(&mut self, result: PredictionResult) {
        let id = self.in_flight.take();
        info!(submission = ?id, risk = %result.risk, "Prediction received");
        self.result = Some(result);
        self.error = None;
        self.loading = false;
    }

    /// Failing half of [`FormState::finish_submit`]; `reason` is only logged
    pub fn fail_submit(&mut self, reason: &str) {
        let id = self.in_flight.take();
        error!(submission = ?id, "Error submitting form: {}", reason);
        self.error = Some(SUBMISSION_FAILED_MESSAGE.to_string());
        self.loading = false;
    }

    /// Begin, await the client, finish
    ///
    /// Returns `RequestError::Busy` without touching state if a submission is
    /// already in flight.
    pub async fn submit(&mut self, client: &dyn PredictionClient) -> Result<()> {
        let submission = self
            .begin_submit()
            .ok_or(Error::Request(crate::error::RequestError::Busy))?;
        let outcome = client.predict(&submission.request).await;
        self.finish_submit(outcome);
        Ok(())
    }
}
