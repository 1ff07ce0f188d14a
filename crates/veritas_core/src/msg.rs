use crate::{AnalysisResult, ConnectionError, Generation, ModelType};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// User replaced the article text.
    TextEdited(String),
    /// A sample picked from one of the pools replaced the article text.
    SampleLoaded(String),
    /// User clicked Clear.
    ClearClicked,
    /// User picked the model used for the next analysis.
    ModelSelected(ModelType),
    /// User clicked Detect Fake News.
    AnalyzeClicked,
    /// Engine completion for the submission tagged `generation`.
    AnalysisFinished {
        generation: Generation,
        outcome: Result<AnalysisResult, ConnectionError>,
    },
    /// User asked whether the engine is reachable.
    HealthCheckRequested,
    /// Engine health probe finished.
    HealthChecked { reachable: bool },
}
