//! Error types shared across fragreel crates.

use std::path::PathBuf;

/// Top-level error type for fragreel operations.
#[derive(Debug, thiserror::Error)]
pub enum FragreelError {
    #[error("Missing input: {path}")]
    MissingInput { path: PathBuf },

    #[error("Empty input: {message}")]
    EmptyInput { message: String },

    #[error(
        "Clip {clip_index} is {clip_secs:.3}s long, which does not exceed the {transition_secs}s transition"
    )]
    DegenerateTransition {
        clip_index: usize,
        clip_secs: f64,
        transition_secs: f64,
    },

    #[error("External engine error: {message}")]
    ExternalEngine { message: String },

    #[error("Event table error at line {line}: {message}")]
    EventTable { line: usize, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FragreelError.
pub type FragreelResult<T> = Result<T, FragreelError>;

impl FragreelError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: msg.into(),
        }
    }

    pub fn external_engine(msg: impl Into<String>) -> Self {
        Self::ExternalEngine {
            message: msg.into(),
        }
    }

    pub fn event_table(line: usize, msg: impl Into<String>) -> Self {
        Self::EventTable {
            line,
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_transition_message_names_clip() {
        let err = FragreelError::DegenerateTransition {
            clip_index: 2,
            clip_secs: 0.4,
            transition_secs: 0.5,
        };
        let message = err.to_string();
        assert!(message.contains("Clip 2"));
        assert!(message.contains("0.400s"));
        assert!(message.contains("0.5s"));
    }

    #[test]
    fn test_missing_input_reports_path() {
        let err = FragreelError::missing_input("inputs/demo.mp4");
        assert_eq!(err.to_string(), "Missing input: inputs/demo.mp4");
    }
}
