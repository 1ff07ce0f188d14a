use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use veritas_core::{AnalysisResult, ConnectionError, Effect, Generation, ModelType, Msg, Verdict};
use veritas_engine::{ClassifyError, EngineEvent, EngineHandle, ModelKind, Prediction};
use veritas_logging::{veritas_debug, veritas_error, veritas_info};

use super::app::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Receives the effects `update` asks for.
pub trait EffectSink {
    fn enqueue(&self, effects: Vec<Effect>);
}

pub struct EffectRunner {
    engine: EngineHandle,
    event_tx: mpsc::Sender<AppEvent>,
    /// Submission the engine has not answered yet.
    pending: Arc<Mutex<Option<Generation>>>,
}

impl EffectRunner {
    /// Forwards engine events to `event_tx`, holding successful results back
    /// until `min_visible` has passed since submission.
    pub fn new(
        engine: EngineHandle,
        event_tx: mpsc::Sender<AppEvent>,
        min_visible: Duration,
    ) -> Self {
        let runner = Self {
            engine,
            event_tx,
            pending: Arc::new(Mutex::new(None)),
        };
        runner.spawn_event_loop(min_visible);
        runner
    }

    fn spawn_event_loop(&self, min_visible: Duration) {
        let engine = self.engine.clone();
        let event_tx = self.event_tx.clone();
        let pending = Arc::clone(&self.pending);
        thread::spawn(move || loop {
            let event = match engine.recv_timeout(POLL_INTERVAL) {
                Ok(Some(event)) => event,
                Ok(None) => continue,
                Err(err) => {
                    veritas_error!("Engine event channel closed: {}", err);
                    if let Some(generation) = take_pending(&pending) {
                        let _ = event_tx.send(failed(generation, err));
                    }
                    break;
                }
            };
            if let EngineEvent::AnalysisCompleted { request_id, .. } = &event {
                clear_pending(&pending, *request_id);
            }
            let (msg, delay) = translate(event, min_visible);
            if delay.is_zero() {
                if event_tx.send(AppEvent::Core(msg)).is_err() {
                    break;
                }
            } else {
                veritas_debug!("Holding result back for {:?}", delay);
                let event_tx = event_tx.clone();
                thread::spawn(move || {
                    thread::sleep(delay);
                    let _ = event_tx.send(AppEvent::Core(msg));
                });
            }
        });
    }
}

impl EffectSink for EffectRunner {
    fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::SubmitAnalysis {
                    generation,
                    request,
                } => {
                    let (text, model) = request.into_parts();
                    veritas_info!(
                        "SubmitAnalysis generation={} model={} chars={}",
                        generation,
                        model,
                        text.len()
                    );
                    if let Ok(mut pending) = self.pending.lock() {
                        *pending = Some(generation);
                    }
                    if let Err(err) = self.engine.analyze(generation, text, map_model(model)) {
                        veritas_error!("Could not submit generation {}: {}", generation, err);
                        // The event loop may already have reported it.
                        if take_pending(&self.pending) == Some(generation) {
                            let _ = self.event_tx.send(failed(generation, err));
                        }
                    }
                }
                Effect::CheckHealth => {
                    if let Err(err) = self.engine.check_health() {
                        veritas_error!("Could not check engine health: {}", err);
                        let _ = self
                            .event_tx
                            .send(AppEvent::Core(Msg::HealthChecked { reachable: false }));
                    }
                }
            }
        }
    }
}

fn take_pending(pending: &Mutex<Option<Generation>>) -> Option<Generation> {
    pending.lock().ok()?.take()
}

fn clear_pending(pending: &Mutex<Option<Generation>>, generation: Generation) {
    if let Ok(mut pending) = pending.lock() {
        if *pending == Some(generation) {
            *pending = None;
        }
    }
}

fn failed(generation: Generation, err: ClassifyError) -> AppEvent {
    AppEvent::Core(Msg::AnalysisFinished {
        generation,
        outcome: Err(map_error(err)),
    })
}

/// Maps an engine event to a core message plus how long to hold it back.
fn translate(event: EngineEvent, min_visible: Duration) -> (Msg, Duration) {
    match event {
        EngineEvent::AnalysisCompleted {
            request_id,
            result,
            elapsed,
        } => {
            let delay = match &result {
                Ok(_) => min_visible.saturating_sub(elapsed),
                Err(_) => Duration::ZERO,
            };
            let msg = Msg::AnalysisFinished {
                generation: request_id,
                outcome: result.map(map_prediction).map_err(map_error),
            };
            (msg, delay)
        }
        EngineEvent::HealthChecked { reachable } => {
            (Msg::HealthChecked { reachable }, Duration::ZERO)
        }
    }
}

fn map_model(model: ModelType) -> ModelKind {
    match model {
        ModelType::Ml => ModelKind::Ml,
        ModelType::Dl => ModelKind::Dl,
    }
}

fn map_prediction(prediction: Prediction) -> AnalysisResult {
    AnalysisResult {
        verdict: Verdict::from_prediction(&prediction.prediction),
        confidence: prediction.confidence,
        engine_label: prediction.model_used,
    }
}

fn map_error(err: ClassifyError) -> ConnectionError {
    ConnectionError::new(err.to_string())
}
