use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which backend model the engine should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelType {
    /// Classical machine learning model.
    Ml,
    /// Neural network model.
    #[default]
    Dl,
}

impl ModelType {
    /// Wire tag sent as `model_type`.
    pub fn as_str(self) -> &'static str {
        match self {
            ModelType::Ml => "ml",
            ModelType::Dl => "dl",
        }
    }

    /// Label shown on the model selector.
    pub fn label(self) -> &'static str {
        match self {
            ModelType::Ml => "Machine Learning",
            ModelType::Dl => "Deep Learning",
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "ml" => Ok(ModelType::Ml),
            "dl" => Ok(ModelType::Dl),
            other => Err(format!("unknown model type '{other}' (expected ml or dl)")),
        }
    }
}

/// Counts maximal runs of non-whitespace in `text`.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// The article text and model selection being edited by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputModel {
    text: String,
    model: ModelType,
}

impl InputModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(model: ModelType) -> Self {
        Self {
            text: String::new(),
            model,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn model(&self) -> ModelType {
        self.model
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn select_model(&mut self, model: ModelType) {
        self.model = model;
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.text)
    }

    /// True iff the trimmed text is empty.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_count_ignores_whitespace_runs() {
        assert_eq!(word_count("  "), 0);
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("Hello   world"), 2);
        assert_eq!(word_count("one"), 1);
        assert_eq!(word_count("\tleading\n\ntrailing \r\n"), 2);
    }

    #[test]
    fn blank_means_whitespace_only() {
        let mut input = InputModel::new();
        assert!(input.is_blank());

        input.set_text(" \n\t ");
        assert!(input.is_blank());
        assert_eq!(input.word_count(), 0);

        input.set_text(" x ");
        assert!(!input.is_blank());
    }

    #[test]
    fn clear_resets_text_but_keeps_model() {
        let mut input = InputModel::with_model(ModelType::Ml);
        input.set_text("Stock market closes higher today.");
        input.clear();

        assert_eq!(input.text(), "");
        assert_eq!(input.word_count(), 0);
        assert_eq!(input.model(), ModelType::Ml);
    }

    #[test]
    fn model_defaults_to_deep_learning() {
        assert_eq!(InputModel::new().model(), ModelType::Dl);
        assert_eq!(ModelType::default().as_str(), "dl");
    }

    #[test]
    fn model_type_parses_wire_tags() {
        assert_eq!("ML".parse::<ModelType>(), Ok(ModelType::Ml));
        assert_eq!(" dl".parse::<ModelType>(), Ok(ModelType::Dl));
        assert!("cnn".parse::<ModelType>().is_err());
    }
}
