//! Veritas core: pure analysis workflow state machine and view-model helpers.
mod effect;
mod input;
mod msg;
mod samples;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use input::{word_count, InputModel, ModelType};
pub use msg::Msg;
pub use samples::{SampleCatalog, SampleError, SamplePool, SampleProvider};
pub use state::{
    AnalysisRequest, AnalysisResult, AppState, ConnectionError, EngineStatus, Generation, Verdict,
    WorkflowState, CONNECTION_ERROR_MESSAGE,
};
pub use update::update;
pub use view_model::{AppViewModel, BadgeVariant, ResultView, WorkflowPhase};
