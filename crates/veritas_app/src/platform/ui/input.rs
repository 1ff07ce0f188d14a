//! Parsing of terminal input lines into user commands.

use veritas_core::{ModelType, SamplePool};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text appended to the article.
    Append(String),
    Sample(SamplePool),
    Clear,
    Model(ModelType),
    Analyze,
    Health,
    Show,
    Help,
    Quit,
    /// A `:command` that could not be understood; carries the reason.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = trimmed.trim_start().strip_prefix(':') else {
        return Command::Append(trimmed.to_string());
    };

    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next();
    match (name.as_str(), arg) {
        ("real", None) => Command::Sample(SamplePool::Real),
        ("fake", None) => Command::Sample(SamplePool::Fake),
        ("clear", None) => Command::Clear,
        ("analyze" | "analyse" | "go", None) => Command::Analyze,
        ("health", None) => Command::Health,
        ("show", None) => Command::Show,
        ("help" | "h" | "?", None) => Command::Help,
        ("quit" | "q" | "exit", None) => Command::Quit,
        ("model", Some(tag)) => match tag.parse::<ModelType>() {
            Ok(model) => Command::Model(model),
            Err(reason) => Command::Invalid(reason),
        },
        ("model", None) => Command::Invalid("usage: :model ml|dl".to_string()),
        _ => Command::Invalid(format!("unknown command ':{rest}' (try :help)")),
    }
}

/// Text after appending `line` to `current`, newline-separated.
pub fn append_line(current: &str, line: &str) -> String {
    if current.is_empty() {
        line.to_string()
    } else {
        format!("{current}\n{line}")
    }
}
