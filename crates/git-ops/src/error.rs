//! Error types for git-ops operations

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for git-ops operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Errors that can occur while driving git or the code host
#[derive(Debug, Error)]
pub enum GitError {
    /// The process could not be started at all
    #[error("Failed to execute `{command}`")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// A strict command exited with a non-zero status
    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Not a git repository
    #[error("Not a git repository: {path}")]
    NotAGitRepository { path: PathBuf },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a task change failed
    #[error(transparent)]
    Core(#[from] taskline_core::Error),
}

impl GitError {
    /// Create a CommandFailed error
    pub fn command_failed(
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// True when a command ran and reported failure, as opposed to not running
    pub fn is_command_failure(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }
}
