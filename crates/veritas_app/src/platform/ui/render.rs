use veritas_core::{AppViewModel, EngineStatus, ModelType, ResultView, WorkflowPhase};

use super::constants::BAR_WIDTH;

const TEXT_PREVIEW_CHARS: usize = 72;

pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Article: {} words | {}",
        view.word_count,
        text_preview(&view.text)
    ));
    lines.push(format!(
        "Model: {} | [{}]{}",
        model_selector(view.model),
        view.analyze_label(),
        if view.analyze_enabled { "" } else { " (disabled)" }
    ));

    match view.engine_status {
        EngineStatus::Unknown => {}
        EngineStatus::Reachable => lines.push("Engine: reachable".to_string()),
        EngineStatus::Unreachable => lines.push("Engine: unreachable".to_string()),
    }

    match view.phase {
        WorkflowPhase::Idle => {}
        WorkflowPhase::Submitting => lines.push("Analyzing...".to_string()),
        WorkflowPhase::Succeeded => {
            if let Some(result) = &view.result {
                lines.extend(render_result(result));
            }
        }
        WorkflowPhase::Failed => {
            if let Some(error) = &view.error {
                lines.push(format!("Error: {error}"));
            }
        }
    }

    lines
}

pub fn render_result(result: &ResultView) -> Vec<String> {
    let filled = result.bar_cells(BAR_WIDTH);
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));
    vec![
        format!("[{}] {}", result.badge.as_str(), result.badge.headline()),
        format!("Confidence Score: {}", result.confidence_text),
        format!("[{bar}]"),
        result.engine_line(),
    ]
}

fn model_selector(selected: ModelType) -> String {
    [ModelType::Ml, ModelType::Dl]
        .into_iter()
        .map(|model| {
            if model == selected {
                format!("*{}*", model.label())
            } else {
                model.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

fn text_preview(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return "(empty)".to_string();
    }
    if flat.chars().count() <= TEXT_PREVIEW_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(TEXT_PREVIEW_CHARS).collect();
    format!("{cut}...")
}
