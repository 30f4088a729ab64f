//! Error types for task-runner

use thiserror::Error;

/// Result type alias for runner operations
pub type Result<T> = std::result::Result<T, RunnerError>;

/// Errors that stop a run
#[derive(Debug, Error)]
pub enum RunnerError {
    /// Git or code-host operation failed
    #[error("Git error: {0}")]
    Git(#[from] git_ops::GitError),

    /// A step of a specific task failed
    #[error("Task {index} ({branch}) failed during {step}")]
    Task {
        index: usize,
        branch: String,
        step: &'static str,
        #[source]
        source: git_ops::GitError,
    },

    /// Writing the run report failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the run report failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl RunnerError {
    /// Create a Task error
    pub fn task(
        index: usize,
        branch: impl Into<String>,
        step: &'static str,
        source: git_ops::GitError,
    ) -> Self {
        Self::Task {
            index,
            branch: branch.into(),
            step,
            source,
        }
    }
}
