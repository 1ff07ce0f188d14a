use thiserror::Error;
use veritas_logging::{veritas_debug, veritas_info, veritas_warn};

use crate::view_model::{AppViewModel, ResultView, WorkflowPhase};
use crate::{InputModel, ModelType};

/// Monotonic tag attached to each submission; only the current one may land.
pub type Generation = u64;

/// The single message shown for any engine failure.
pub const CONNECTION_ERROR_MESSAGE: &str =
    "Failed to connect to the analysis engine. Make sure the backend is running.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Real,
    Fake,
}

impl Verdict {
    /// `"Fake"` means Fake; any other prediction string is treated as Real.
    pub fn from_prediction(prediction: &str) -> Self {
        if prediction == "Fake" {
            Verdict::Fake
        } else {
            Verdict::Real
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub verdict: Verdict,
    /// Engine certainty in `[0, 1]`, stored as received.
    pub confidence: f64,
    pub engine_label: String,
}

/// Any failure reaching the engine or decoding its answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("connection error: {detail}")]
pub struct ConnectionError {
    pub detail: String,
}

impl ConnectionError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Text and model captured when analysis was triggered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    text: String,
    model: ModelType,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, model: ModelType) -> Self {
        Self {
            text: text.into(),
            model,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> ModelType {
        self.model
    }

    pub fn into_parts(self) -> (String, ModelType) {
        (self.text, self.model)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    #[default]
    Idle,
    Submitting,
    Succeeded(AnalysisResult),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EngineStatus {
    #[default]
    Unknown,
    Reachable,
    Unreachable,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    input: InputModel,
    workflow: WorkflowState,
    generation: Generation,
    /// Generation of the request still outstanding at the engine, if any.
    /// Outlives an edit that moved `workflow` back to Idle.
    in_flight: Option<Generation>,
    engine_status: EngineStatus,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ModelType) -> Self {
        Self {
            input: InputModel::with_model(model),
            ..Self::default()
        }
    }

    pub fn input(&self) -> &InputModel {
        &self.input
    }

    pub fn workflow(&self) -> &WorkflowState {
        &self.workflow
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn engine_status(&self) -> EngineStatus {
        self.engine_status
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.workflow, WorkflowState::Submitting)
    }

    /// True until the engine has answered the last submission, even if that
    /// answer will be discarded.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn view(&self) -> AppViewModel {
        let (phase, result, error) = match &self.workflow {
            WorkflowState::Idle => (WorkflowPhase::Idle, None, None),
            WorkflowState::Submitting => (WorkflowPhase::Submitting, None, None),
            WorkflowState::Succeeded(result) => (
                WorkflowPhase::Succeeded,
                Some(ResultView::from_result(result)),
                None,
            ),
            WorkflowState::Failed(message) => {
                (WorkflowPhase::Failed, None, Some(message.clone()))
            }
        };
        AppViewModel {
            text: self.input.text().to_owned(),
            word_count: self.input.word_count(),
            model: self.input.model(),
            phase,
            analyze_enabled: !self.has_request_in_flight() && !self.input.is_blank(),
            result,
            error,
            engine_status: self.engine_status,
            dirty: self.dirty,
        }
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the text and drops any result, error or outstanding submission.
    pub(crate) fn replace_text(&mut self, text: String) {
        self.input.set_text(text);
        self.invalidate();
    }

    pub(crate) fn clear_input(&mut self) {
        self.input.clear();
        self.invalidate();
    }

    pub(crate) fn select_model(&mut self, model: ModelType) {
        if self.input.model() != model {
            self.input.select_model(model);
            self.mark_dirty();
        }
    }

    /// Guarded `-> Submitting`; `None` when the text is blank or a submission is in flight.
    pub(crate) fn begin_submission(&mut self) -> Option<(Generation, AnalysisRequest)> {
        if let Some(pending) = self.in_flight {
            veritas_debug!("Analyze ignored: submission {} in flight", pending);
            return None;
        }
        if self.input.is_blank() {
            veritas_debug!("Analyze ignored: text is blank");
            return None;
        }

        self.generation += 1;
        self.in_flight = Some(self.generation);
        self.workflow = WorkflowState::Submitting;
        self.mark_dirty();

        let request = AnalysisRequest::new(self.input.text(), self.input.model());
        veritas_info!(
            "Submitting generation={} model={} words={} chars={}",
            self.generation,
            request.model(),
            self.input.word_count(),
            request.text().len()
        );
        Some((self.generation, request))
    }

    pub(crate) fn apply_outcome(
        &mut self,
        generation: Generation,
        outcome: Result<AnalysisResult, ConnectionError>,
    ) {
        if self.in_flight == Some(generation) {
            self.in_flight = None;
            // The trigger may become available again.
            self.mark_dirty();
        }
        if generation != self.generation || !self.is_submitting() {
            veritas_debug!(
                "Discarding stale completion generation={} current={}",
                generation,
                self.generation
            );
            return;
        }

        self.workflow = match outcome {
            Ok(result) => {
                veritas_info!(
                    "Analysis generation={} verdict={:?} confidence={:.4} engine={}",
                    generation,
                    result.verdict,
                    result.confidence,
                    result.engine_label
                );
                WorkflowState::Succeeded(result)
            }
            Err(err) => {
                veritas_warn!("Analysis generation={} failed: {}", generation, err);
                WorkflowState::Failed(CONNECTION_ERROR_MESSAGE.to_string())
            }
        };
        self.mark_dirty();
    }

    pub(crate) fn set_engine_status(&mut self, status: EngineStatus) {
        if self.engine_status != status {
            self.engine_status = status;
            self.mark_dirty();
        }
    }

    fn invalidate(&mut self) {
        // Any outstanding submission loses its right to land, but still
        // blocks new ones until the engine answers it.
        self.generation += 1;
        self.workflow = WorkflowState::Idle;
        self.mark_dirty();
    }
}
