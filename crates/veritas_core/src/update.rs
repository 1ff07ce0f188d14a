use crate::{AppState, Effect, EngineStatus, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::TextEdited(text) | Msg::SampleLoaded(text) => {
            // An in-flight submission is not cancelled; bumping the generation
            // makes its completion land nowhere once it arrives.
            state.replace_text(text);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_input();
            Vec::new()
        }
        Msg::ModelSelected(model) => {
            state.select_model(model);
            Vec::new()
        }
        Msg::AnalyzeClicked => match state.begin_submission() {
            Some((generation, request)) => vec![Effect::SubmitAnalysis {
                generation,
                request,
            }],
            None => Vec::new(),
        },
        Msg::AnalysisFinished {
            generation,
            outcome,
        } => {
            state.apply_outcome(generation, outcome);
            Vec::new()
        }
        Msg::HealthCheckRequested => vec![Effect::CheckHealth],
        Msg::HealthChecked { reachable } => {
            let status = if reachable {
                EngineStatus::Reachable
            } else {
                EngineStatus::Unreachable
            };
            state.set_engine_status(status);
            Vec::new()
        }
    };

    (state, effects)
}
