//! Prediction service client and wire types

pub mod client;
pub mod http;
pub mod wire;

pub use client::PredictionClient;
pub use http::HttpPredictionClient;
pub use wire::{HealthStatus, PredictionRequest, PredictionResult, RiskFlag};
