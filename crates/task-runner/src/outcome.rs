//! Per-task outcomes and the run report

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Result of the stage-and-commit step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitOutcome {
    /// A new commit was created on the task branch
    Committed,
    /// Nothing differed from the branch tip, so no commit was made
    NoChanges,
}

/// Result of the publish step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Merged into trunk with a merge commit
    MergedLocally,
    /// Pushed; the pull request steps are best-effort
    Published {
        pull_request_opened: bool,
        auto_merge_enabled: bool,
    },
    /// Remote publication failed and the branch was merged locally instead
    FellBack { reason: String },
}

impl PublishOutcome {
    /// True if the branch was pushed but a pull request step reported failure
    pub fn has_remote_warning(&self) -> bool {
        matches!(
            self,
            Self::Published {
                pull_request_opened: false,
                ..
            } | Self::Published {
                auto_merge_enabled: false,
                ..
            }
        )
    }
}

/// What happened to one task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskOutcome {
    /// 1-based position in the task list
    pub index: usize,
    pub branch: String,
    pub commit: CommitOutcome,
    pub publish: PublishOutcome,
}

/// Outcomes of a completed run, in task order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub fn committed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.commit == CommitOutcome::Committed)
            .count()
    }

    pub fn no_ops(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.commit == CommitOutcome::NoChanges)
            .count()
    }

    pub fn fallbacks(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.publish, PublishOutcome::FellBack { .. }))
            .count()
    }

    pub fn remote_warnings(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.publish.has_remote_warning())
            .count()
    }

    /// Write the report as pretty-printed JSON
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }
}
