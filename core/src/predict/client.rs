//! Prediction client trait

use crate::error::Result;
use async_trait::async_trait;

use super::wire::{HealthStatus, PredictionRequest, PredictionResult};

/// Trait for prediction service clients
#[async_trait]
pub trait PredictionClient: Send + Sync {
    /// Submit one input record and decode the classification
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult>;

    /// Check that the service is up
    async fn health(&self) -> Result<HealthStatus>;

    /// Where requests are sent, for logs and status lines
    fn endpoint(&self) -> &str;
}
