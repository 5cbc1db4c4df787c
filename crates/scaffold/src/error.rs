//! Error types for the scaffolding core.

use thiserror::Error;

/// Errors raised while running a scaffolding command.
#[derive(Debug, Error)]
pub enum ScaffoldError {
    /// Fatal, user-facing termination of the current command.
    #[error("{0}")]
    Abort(String),

    /// A task name was looked up that nothing registered.
    #[error("No task registered under '{0}'")]
    UnregisteredTask(String),

    /// The prompt collaborator failed for a reason other than cancellation
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A completed form is missing a field its command reads.
    #[error("No answer recorded for {0}")]
    MissingAnswer(String),

    /// Arguments handed to a task did not match its parameter shape.
    #[error("Invalid arguments for task '{task}': {reason}")]
    InvalidTaskArgs { task: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ScaffoldError {
    /// Whether this error is a deliberate abort rather than a failure.
    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Abort(_))
    }
}

/// Result alias used across the crate.
pub type ScaffoldResult<T> = Result<T, ScaffoldError>;
