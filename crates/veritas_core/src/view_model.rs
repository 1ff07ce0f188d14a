use crate::{AnalysisResult, EngineStatus, ModelType, Verdict};

/// Workflow state without its payload, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WorkflowPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppViewModel {
    pub text: String,
    pub word_count: usize,
    pub model: ModelType,
    pub phase: WorkflowPhase,
    pub analyze_enabled: bool,
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub engine_status: EngineStatus,
    pub dirty: bool,
}

impl AppViewModel {
    pub fn analyze_label(&self) -> &'static str {
        if self.phase == WorkflowPhase::Submitting {
            "Analyzing..."
        } else {
            "Detect Fake News"
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    Real,
    Fake,
}

impl BadgeVariant {
    pub fn as_str(self) -> &'static str {
        match self {
            BadgeVariant::Real => "real",
            BadgeVariant::Fake => "fake",
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            BadgeVariant::Real => "LIKELY REAL NEWS",
            BadgeVariant::Fake => "FAKE NEWS DETECTED",
        }
    }
}

/// Formatted rendering of a successful analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub verdict: Verdict,
    pub badge: BadgeVariant,
    /// Confidence as a percentage with one decimal, e.g. `"82.3%"`.
    pub confidence_text: String,
    /// Bar fill in percent, clamped to `0.0..=100.0`.
    pub bar_percent: f64,
    pub engine_label: String,
}

impl ResultView {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let badge = match result.verdict {
            Verdict::Real => BadgeVariant::Real,
            Verdict::Fake => BadgeVariant::Fake,
        };
        let percent = clamp_percent(result.confidence * 100.0);
        Self {
            verdict: result.verdict,
            badge,
            confidence_text: format!("{percent:.1}%"),
            bar_percent: percent,
            engine_label: result.engine_label.clone(),
        }
    }

    pub fn engine_line(&self) -> String {
        format!("Analysis performed using {}", self.engine_label)
    }

    /// Number of filled cells in a bar `width` cells wide.
    pub fn bar_cells(&self, width: usize) -> usize {
        let cells = (width as f64 * self.bar_percent / 100.0).round() as usize;
        cells.min(width)
    }
}

fn clamp_percent(percent: f64) -> f64 {
    if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    }
}
