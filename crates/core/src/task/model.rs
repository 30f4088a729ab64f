//! Task model definitions

use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// A single file write: the full new body of `path`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    /// Path relative to the repository root
    pub path: PathBuf,
    /// Complete file content (overwrite, not patch)
    pub content: String,
}

impl Change {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// One unit of work: file changes plus commit and pull request metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub branch: String,
    pub commit_msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pr_body: Option<String>,
    #[serde(default)]
    pub changes: Vec<Change>,
}

impl Task {
    /// Create a new task; the branch name is normalized
    pub fn new(branch: impl AsRef<str>, commit_msg: impl Into<String>) -> Self {
        Self {
            branch: normalize_branch(branch.as_ref()),
            commit_msg: commit_msg.into(),
            pr_body: None,
            changes: Vec::new(),
        }
    }

    /// Add a file change
    pub fn with_change(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.changes.push(Change::new(path, content));
        self
    }

    /// Set the pull request body
    pub fn with_pr_body(mut self, body: impl Into<String>) -> Self {
        self.pr_body = Some(body.into());
        self
    }

    /// Pull request title, which is always the commit message
    pub fn pr_title(&self) -> &str {
        &self.commit_msg
    }

    /// Pull request body, falling back to a summary of the commit message
    pub fn pr_body(&self) -> String {
        match self.pr_body.as_deref() {
            Some(body) if !body.trim().is_empty() => body.to_string(),
            _ => format!("This PR introduces: {}", self.commit_msg),
        }
    }

    /// Message used for the non-fast-forward merge into trunk
    pub fn merge_message(&self) -> String {
        format!("Merge {}", self.branch)
    }

    /// Check the task is safe to apply, returning a reason when it is not
    pub(crate) fn problem(&self) -> Option<String> {
        if self.branch.is_empty() {
            return Some("branch name is empty".to_string());
        }
        if self.commit_msg.trim().is_empty() {
            return Some("commit message is empty".to_string());
        }
        self.changes
            .iter()
            .find(|c| !is_contained(&c.path))
            .map(|c| format!("change path {:?} is not a file inside the working tree", c.path))
    }
}

/// Normalize a branch name: lowercase, whitespace runs become `-`
pub fn normalize_branch(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

/// Relative, free of `..`, names an actual file and stays out of `.git`
fn is_contained(path: &Path) -> bool {
    let mut names = 0;
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::Normal(name) if name.eq_ignore_ascii_case(".git") => return false,
            Component::Normal(_) => names += 1,
            _ => return false,
        }
    }
    names > 0
}
