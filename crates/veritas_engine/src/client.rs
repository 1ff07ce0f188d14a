use std::time::Duration;

use reqwest::{StatusCode, Url};
use serde::Deserialize;
use veritas_logging::{veritas_debug, veritas_trace};

use crate::{ClassifyError, FailureKind, ModelKind, PredictRequest, Prediction};

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:5000/predict";

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    /// One attempt, no retry. `text` is sent verbatim.
    async fn classify(&self, text: &str, model: ModelKind) -> Result<Prediction, ClassifyError>;

    async fn health(&self) -> Result<(), ClassifyError>;
}

/// Health endpoint next to the prediction endpoint (`.../predict` -> `.../health`).
pub fn health_url(endpoint: &Url) -> Result<Url, ClassifyError> {
    endpoint
        .join("health")
        .map_err(|err| ClassifyError::new(FailureKind::InvalidEndpoint, err.to_string()))
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl ReqwestClassifier {
    pub fn new(settings: ClientSettings) -> Result<Self, ClassifyError> {
        let endpoint = Url::parse(&settings.endpoint)
            .map_err(|err| ClassifyError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[derive(Debug, Deserialize)]
struct HealthBody {
    status: String,
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(&self, text: &str, model: ModelKind) -> Result<Prediction, ClassifyError> {
        let body = PredictRequest {
            text,
            model_type: model,
        };
        veritas_debug!(
            "POST {} model_type={:?} chars={}",
            self.endpoint,
            model,
            text.len()
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_status_error(status));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        veritas_trace!("prediction body {} bytes", bytes.len());
        serde_json::from_slice::<Prediction>(&bytes)
            .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))
    }

    async fn health(&self) -> Result<(), ClassifyError> {
        let url = health_url(&self.endpoint)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(http_status_error(status));
        }

        let bytes = response.bytes().await.map_err(map_reqwest_error)?;
        let body: HealthBody = serde_json::from_slice(&bytes)
            .map_err(|err| ClassifyError::new(FailureKind::MalformedResponse, err.to_string()))?;
        if body.status == "ok" {
            Ok(())
        } else {
            Err(ClassifyError::new(
                FailureKind::MalformedResponse,
                format!("unexpected health status '{}'", body.status),
            ))
        }
    }
}

fn http_status_error(status: StatusCode) -> ClassifyError {
    ClassifyError::new(FailureKind::HttpStatus(status.as_u16()), status.to_string())
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return ClassifyError::new(FailureKind::MalformedResponse, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}
