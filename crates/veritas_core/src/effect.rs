use crate::{AnalysisRequest, Generation};

/// Side effects requested by [`crate::update`]; executed by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send the request to the classification engine, tagged with its generation.
    SubmitAnalysis {
        generation: Generation,
        request: AnalysisRequest,
    },
    /// Probe the engine's health endpoint.
    CheckHealth,
}
