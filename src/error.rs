//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised by terminus components.
///
/// Every variant is recovered within a single query's processing; none of
/// them is allowed to end the interactive session.
#[derive(Debug, Error)]
pub enum TerminusError {
    /// The generative backend could not produce a command.
    #[error("backend request failed: {0}")]
    Backend(String),

    /// History could not be persisted.
    #[error("history error: {0}")]
    History(String),

    /// The shell process could not be started.
    #[error("failed to spawn command: {0}")]
    Spawn(String),

    /// A custom workflow pattern is not a valid regex.
    #[error("invalid workflow pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The line editor failed to start.
    #[error("line editor error: {0}")]
    Editor(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, TerminusError>;
