use std::sync::Once;

use veritas_core::{
    update, AnalysisRequest, AnalysisResult, AppState, ConnectionError, Effect, EngineStatus,
    ModelType, Msg, Verdict, WorkflowPhase, WorkflowState, CONNECTION_ERROR_MESSAGE,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(veritas_logging::initialize_for_tests);
}

fn with_text(text: &str) -> AppState {
    let (state, _) = update(AppState::new(), Msg::TextEdited(text.to_string()));
    state
}

fn submit(state: AppState) -> (AppState, u64) {
    let (state, effects) = update(state, Msg::AnalyzeClicked);
    let generation = match effects.as_slice() {
        [Effect::SubmitAnalysis { generation, .. }] => *generation,
        other => panic!("expected one submission, got {other:?}"),
    };
    (state, generation)
}

fn real_result(confidence: f64) -> AnalysisResult {
    AnalysisResult {
        verdict: Verdict::Real,
        confidence,
        engine_label: "dl-v1".to_string(),
    }
}

fn finish(
    state: AppState,
    generation: u64,
    outcome: Result<AnalysisResult, ConnectionError>,
) -> AppState {
    update(state, Msg::AnalysisFinished { generation, outcome }).0
}

#[test]
fn analyze_moves_to_submitting_with_request() {
    init_logging();
    let state = with_text("Stock market closes higher today.");
    let (state, _) = update(state, Msg::ModelSelected(ModelType::Ml));

    let (state, effects) = update(state, Msg::AnalyzeClicked);

    assert_eq!(state.workflow(), &WorkflowState::Submitting);
    assert_eq!(
        effects,
        vec![Effect::SubmitAnalysis {
            generation: state.generation(),
            request: AnalysisRequest::new("Stock market closes higher today.", ModelType::Ml),
        }]
    );
    let view = state.view();
    assert_eq!(view.phase, WorkflowPhase::Submitting);
    assert!(!view.analyze_enabled);
    assert_eq!(view.analyze_label(), "Analyzing...");
}

#[test]
fn request_carries_untrimmed_text_and_default_model() {
    init_logging();
    let (_, effects) = update(with_text("  padded text \n"), Msg::AnalyzeClicked);

    match effects.as_slice() {
        [Effect::SubmitAnalysis { request, .. }] => {
            assert_eq!(request.text(), "  padded text \n");
            assert_eq!(request.model(), ModelType::Dl);
        }
        other => panic!("unexpected effects {other:?}"),
    }
}

#[test]
fn blank_text_analyze_is_ignored() {
    init_logging();
    for text in ["", "   ", "\n\t  \n"] {
        let mut state = with_text(text);
        assert!(state.consume_dirty());

        let (mut next, effects) = update(state.clone(), Msg::AnalyzeClicked);

        assert!(effects.is_empty());
        assert_eq!(next, state);
        assert!(!next.consume_dirty());
        assert!(!next.view().analyze_enabled);
    }
}

#[test]
fn analyze_while_submitting_is_noop() {
    init_logging();
    let (state, generation) = submit(with_text("one two three"));

    let (next, effects) = update(state.clone(), Msg::AnalyzeClicked);

    assert!(effects.is_empty());
    assert_eq!(next.workflow(), &WorkflowState::Submitting);
    assert_eq!(next.generation(), generation);
}

#[test]
fn success_lands_as_succeeded() {
    init_logging();
    let (state, generation) = submit(with_text("NASA launches new satellite."));

    let mut state = finish(state, generation, Ok(real_result(0.91)));

    assert_eq!(state.workflow(), &WorkflowState::Succeeded(real_result(0.91)));
    assert!(state.consume_dirty());
    let view = state.view();
    assert_eq!(view.phase, WorkflowPhase::Succeeded);
    assert_eq!(view.result.unwrap().confidence_text, "91.0%");
    assert!(view.error.is_none());
    assert!(view.analyze_enabled);
}

#[test]
fn failure_lands_as_fixed_message_and_allows_retry() {
    init_logging();
    let (state, generation) = submit(with_text("NASA launches new satellite."));

    let state = finish(state, generation, Err(ConnectionError::new("connection refused")));

    assert_eq!(
        state.workflow(),
        &WorkflowState::Failed(CONNECTION_ERROR_MESSAGE.to_string())
    );
    assert_eq!(state.view().error.as_deref(), Some(CONNECTION_ERROR_MESSAGE));
    assert!(state.view().result.is_none());

    let (state, retry) = submit(state);
    assert!(retry > generation);
    let state = finish(state, retry, Ok(real_result(0.6)));
    assert!(matches!(state.workflow(), WorkflowState::Succeeded(_)));
}

#[test]
fn new_submission_clears_previous_result() {
    init_logging();
    let (state, generation) = submit(with_text("text"));
    let state = finish(state, generation, Ok(real_result(0.7)));

    let (state, _) = submit(state);

    assert_eq!(state.workflow(), &WorkflowState::Submitting);
    assert!(state.view().result.is_none());
}

#[test]
fn editing_clears_result_and_error() {
    init_logging();
    let (state, generation) = submit(with_text("text"));
    let state = finish(state, generation, Ok(real_result(0.7)));

    let (state, effects) = update(state, Msg::TextEdited("text, edited".into()));
    assert!(effects.is_empty());
    assert_eq!(state.workflow(), &WorkflowState::Idle);

    let (state, generation) = submit(state);
    let state = finish(state, generation, Err(ConnectionError::new("boom")));
    let (state, _) = update(state, Msg::SampleLoaded("sample".into()));
    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert_eq!(state.input().text(), "sample");
}

#[test]
fn clear_resets_from_every_state() {
    init_logging();
    let idle = with_text("words here");
    let (submitting, generation) = submit(with_text("words here"));
    let succeeded = finish(submitting.clone(), generation, Ok(real_result(0.5)));
    let failed = finish(submitting.clone(), generation, Err(ConnectionError::new("x")));

    for state in [idle, submitting, succeeded, failed] {
        let (state, effects) = update(state, Msg::ClearClicked);
        assert!(effects.is_empty());
        assert_eq!(state.workflow(), &WorkflowState::Idle);
        assert_eq!(state.input().word_count(), 0);
        assert_eq!(state.view().text, "");

        // Clearing twice changes nothing visible.
        let (state, _) = update(state, Msg::ClearClicked);
        assert_eq!(state.workflow(), &WorkflowState::Idle);
        assert_eq!(state.input().word_count(), 0);
    }
}

#[test]
fn stale_completion_after_clear_is_discarded() {
    init_logging();
    let (state, generation) = submit(with_text("slow request"));
    let (state, _) = update(state, Msg::ClearClicked);

    let state = finish(state, generation, Ok(real_result(0.99)));

    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert!(state.view().result.is_none());
}

#[test]
fn second_analyze_waits_for_stale_completion() {
    init_logging();
    let (state, first) = submit(with_text("first"));
    let (state, _) = update(state, Msg::TextEdited("first, edited".into()));
    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert!(state.has_request_in_flight());
    assert!(!state.view().analyze_enabled);

    let (state, effects) = update(state, Msg::AnalyzeClicked);
    assert!(effects.is_empty());
    assert_eq!(state.workflow(), &WorkflowState::Idle);

    let mut state = finish(state, first, Err(ConnectionError::new("late failure")));
    assert_eq!(state.workflow(), &WorkflowState::Idle);
    assert!(state.view().error.is_none());
    assert!(!state.has_request_in_flight());
    assert!(state.consume_dirty());
    assert!(state.view().analyze_enabled);

    let (state, second) = submit(state);
    assert!(second > first);
    let state = finish(state, second, Ok(real_result(0.8)));
    assert_eq!(state.workflow(), &WorkflowState::Succeeded(real_result(0.8)));
}

#[test]
fn at_most_one_request_outstanding_across_edits() {
    init_logging();
    let (mut state, _) = submit(with_text("one"));
    let mut submissions = 1;

    for text in ["two", "three", "four"] {
        let (next, _) = update(state, Msg::SampleLoaded(text.into()));
        let (next, effects) = update(next, Msg::AnalyzeClicked);
        submissions += effects.len();
        state = next;
    }

    assert_eq!(submissions, 1);
}

#[test]
fn duplicate_completion_is_ignored() {
    init_logging();
    let (state, generation) = submit(with_text("text"));
    let state = finish(state, generation, Ok(real_result(0.8)));

    let state = finish(state, generation, Err(ConnectionError::new("again")));

    assert_eq!(state.workflow(), &WorkflowState::Succeeded(real_result(0.8)));
}

#[test]
fn model_selection_keeps_workflow_state() {
    init_logging();
    let (state, generation) = submit(with_text("text"));
    let state = finish(state, generation, Ok(real_result(0.8)));

    let (mut state, effects) = update(state, Msg::ModelSelected(ModelType::Ml));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert_eq!(state.view().model, ModelType::Ml);
    assert!(matches!(state.workflow(), WorkflowState::Succeeded(_)));

    let (mut state, _) = update(state, Msg::ModelSelected(ModelType::Ml));
    assert!(!state.consume_dirty());
}

#[test]
fn word_count_follows_text() {
    init_logging();
    let state = with_text("Hello   world");
    assert_eq!(state.view().word_count, 2);

    let (state, _) = update(state, Msg::TextEdited("  ".into()));
    assert_eq!(state.view().word_count, 0);
}

#[test]
fn health_check_round_trip() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::HealthCheckRequested);
    assert_eq!(effects, vec![Effect::CheckHealth]);
    assert_eq!(state.engine_status(), EngineStatus::Unknown);

    let (state, _) = update(state, Msg::HealthChecked { reachable: false });
    assert_eq!(state.view().engine_status, EngineStatus::Unreachable);
    assert_eq!(state.workflow(), &WorkflowState::Idle);

    let (state, _) = update(state, Msg::HealthChecked { reachable: true });
    assert_eq!(state.engine_status(), EngineStatus::Reachable);
}
