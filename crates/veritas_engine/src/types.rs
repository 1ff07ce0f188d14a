use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type RequestId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Ml,
    Dl,
}

/// JSON body posted to the prediction endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictRequest<'a> {
    pub text: &'a str,
    pub model_type: ModelKind,
}

/// Successful answer from the prediction endpoint. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Prediction {
    pub prediction: String,
    pub confidence: f64,
    pub model_used: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    AnalysisCompleted {
        request_id: RequestId,
        result: Result<Prediction, ClassifyError>,
        elapsed: Duration,
    },
    HealthChecked {
        reachable: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ClassifyError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClassifyError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    HttpStatus(u16),
    Timeout,
    MalformedResponse,
    Network,
    /// The background worker is gone; nothing sent to it will be answered.
    EngineStopped,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::EngineStopped => write!(f, "engine stopped"),
        }
    }
}
