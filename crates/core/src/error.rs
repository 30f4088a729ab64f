//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid task #{index}: {reason}")]
    InvalidTask { index: usize, reason: String },
}

impl Error {
    /// Create an InvalidTask error for the task at `index` (1-based)
    pub fn invalid_task(index: usize, reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            index,
            reason: reason.into(),
        }
    }
}
