//! HTTP prediction client using reqwest

use crate::config::ServiceConfig;
use crate::error::{Error, RequestError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use super::client::PredictionClient;
use super::wire::{ErrorBody, HealthStatus, PredictionRequest, PredictionResult};

/// Prediction client talking JSON over HTTP
pub struct HttpPredictionClient {
    client: reqwest::Client,
    predict_url: Url,
    health_url: Url,
    endpoint: String,
}

impl HttpPredictionClient {
    /// Create a new client from resolved service config
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        let predict_url = config.predict_url()?;
        let health_url = config.health_url()?;

        let mut headers = HeaderMap::new();
        for (key, value) in &config.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                crate::error::ConfigError::InvalidValue {
                    field: format!("headers.{}", key),
                    value: e.to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                crate::error::ConfigError::InvalidValue {
                    field: format!("headers.{}", key),
                    value: e.to_string(),
                }
            })?;
            headers.insert(name, value);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: predict_url.to_string(),
            predict_url,
            health_url,
        })
    }

    /// Turn a non-2xx response into a status error, keeping the service's detail text
    async fn status_error(response: reqwest::Response) -> Error {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let detail = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => match parsed.detail {
                serde_json::Value::String(text) => text,
                other => other.to_string(),
            },
            Err(_) if body.is_empty() => "no response body".to_string(),
            Err(_) => body,
        };
        warn!("Prediction service answered {}: {}", status, detail);
        RequestError::Status { status, detail }.into()
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    async fn predict(&self, request: &PredictionRequest) -> Result<PredictionResult> {
        debug!("POST {}", self.predict_url);

        let response = self
            .client
            .post(self.predict_url.clone())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        // Decode by hand so shape errors surface as Decode, not Transport
        let bytes = response.bytes().await?;
        serde_json::from_slice::<PredictionResult>(&bytes).map_err(|e| {
            RequestError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    async fn health(&self) -> Result<HealthStatus> {
        debug!("GET {}", self.health_url);

        let response = self.client.get(self.health_url.clone()).send().await?;
        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice::<HealthStatus>(&bytes).map_err(|e| {
            RequestError::Decode {
                message: e.to_string(),
            }
            .into()
        })
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
