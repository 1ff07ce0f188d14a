use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use veritas_logging::{veritas_debug, veritas_error, veritas_info, veritas_warn};

use crate::client::{ClientSettings, Classifier, ReqwestClassifier};
use crate::{ClassifyError, EngineEvent, FailureKind, ModelKind, RequestId};

enum EngineCommand {
    Analyze {
        request_id: RequestId,
        text: String,
        model: ModelKind,
    },
    CheckHealth,
    Shutdown,
}

/// Synchronous front for the async classifier.
///
/// Commands run on a tokio runtime owned by a background thread; each one
/// produces exactly one [`EngineEvent`]. Clones share the same channels.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Result<Self, ClassifyError> {
        let classifier = ReqwestClassifier::new(settings)?;
        Ok(Self::with_classifier(Arc::new(classifier)))
    }

    pub fn with_classifier(classifier: Arc<dyn Classifier>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    veritas_error!("Engine could not start its runtime: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                if matches!(command, EngineCommand::Shutdown) {
                    break;
                }
                let classifier = classifier.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(classifier.as_ref(), command, event_tx).await;
                });
            }
            // Refuse new commands before the event channel closes.
            drop(cmd_rx);
            drop(runtime);
            drop(event_tx);
            veritas_info!("Engine stopped");
        });

        Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        }
    }

    pub fn analyze(
        &self,
        request_id: RequestId,
        text: impl Into<String>,
        model: ModelKind,
    ) -> Result<(), ClassifyError> {
        self.send(EngineCommand::Analyze {
            request_id,
            text: text.into(),
            model,
        })
    }

    pub fn check_health(&self) -> Result<(), ClassifyError> {
        self.send(EngineCommand::CheckHealth)
    }

    /// Stops the worker. Outstanding requests are dropped unanswered and
    /// every clone starts reporting [`FailureKind::EngineStopped`].
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    /// `Ok(None)` on timeout; an error once the worker is gone.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, ClassifyError> {
        let event_rx = self.event_rx.lock().map_err(|_| stopped())?;
        match event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(mpsc::RecvTimeoutError::Timeout) => Ok(None),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(stopped()),
        }
    }

    fn send(&self, command: EngineCommand) -> Result<(), ClassifyError> {
        self.cmd_tx.send(command).map_err(|_| stopped())
    }
}

fn stopped() -> ClassifyError {
    ClassifyError::new(FailureKind::EngineStopped, "engine worker is not running")
}

async fn handle_command(
    classifier: &dyn Classifier,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Analyze {
            request_id,
            text,
            model,
        } => {
            let started = Instant::now();
            let result = classifier.classify(&text, model).await;
            let elapsed = started.elapsed();
            match &result {
                Ok(prediction) => veritas_debug!(
                    "Request {} answered in {:?}: {} ({})",
                    request_id,
                    elapsed,
                    prediction.prediction,
                    prediction.model_used
                ),
                Err(err) => {
                    veritas_warn!("Request {} failed after {:?}: {}", request_id, elapsed, err)
                }
            }
            let _ = event_tx.send(EngineEvent::AnalysisCompleted {
                request_id,
                result,
                elapsed,
            });
        }
        EngineCommand::Shutdown => {}
        EngineCommand::CheckHealth => {
            let reachable = match classifier.health().await {
                Ok(()) => true,
                Err(err) => {
                    veritas_warn!("Health check failed: {}", err);
                    false
                }
            };
            let _ = event_tx.send(EngineEvent::HealthChecked { reachable });
        }
    }
}
