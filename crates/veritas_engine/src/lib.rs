//! Veritas engine: HTTP client for the classification service and the
//! background worker that runs it.
mod client;
mod engine;
mod types;

pub use client::{health_url, ClientSettings, Classifier, ReqwestClassifier, DEFAULT_ENDPOINT};
pub use engine::EngineHandle;
pub use types::{
    ClassifyError, EngineEvent, FailureKind, ModelKind, Prediction, PredictRequest, RequestId,
};
