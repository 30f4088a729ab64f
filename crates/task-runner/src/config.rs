//! Runner configuration

use serde::{Deserialize, Serialize};

/// Where a committed task branch ends up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublishMode {
    /// Merge into trunk locally with a merge commit
    Local,
    /// Push, open a pull request and enable auto-merge
    Remote,
}

impl Default for PublishMode {
    fn default() -> Self {
        Self::Remote
    }
}

/// Configuration for the task runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Integration branch every task branch starts from and merges into
    pub trunk: String,
    /// Remote that task branches are pushed to
    pub remote: String,
    pub mode: PublishMode,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            trunk: "main".to_string(),
            remote: "origin".to_string(),
            mode: PublishMode::default(),
        }
    }
}

impl RunnerConfig {
    /// Local-mode configuration with default trunk and remote
    pub fn local() -> Self {
        Self {
            mode: PublishMode::Local,
            ..Self::default()
        }
    }
}
