//! Code host (pull request) operations

use async_trait::async_trait;
use std::path::PathBuf;

use crate::commands::{run_command, CommandMode, CommandOutput};
use crate::error::Result;
use crate::message_file::MessageFile;

/// Pull request to open against the code host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    pub title: String,
    pub body: String,
    pub base: String,
    pub head: String,
}

/// Best-effort pull request operations
///
/// A non-zero exit comes back as a `CommandOutput` with `success == false`.
/// An `Err` means the host could not be reached at all.
#[async_trait]
pub trait CodeHost: Send + Sync {
    /// Open a pull request
    async fn create_pull_request(&self, pr: &PullRequest) -> Result<CommandOutput>;

    /// Merge the branch's pull request once checks pass, deleting the branch
    async fn enable_auto_merge(&self, branch: &str) -> Result<CommandOutput>;
}

/// [`CodeHost`] backed by the GitHub CLI
#[derive(Debug, Clone)]
pub struct GhCli {
    workdir: PathBuf,
    program: String,
}

impl GhCli {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            program: "gh".to_string(),
        }
    }

    /// Use a different `gh` executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl CodeHost for GhCli {
    async fn create_pull_request(&self, pr: &PullRequest) -> Result<CommandOutput> {
        let body = MessageFile::create("taskline-pr-body-", &pr.body)?;
        let body_path = body.arg();
        run_command(
            &self.workdir,
            &self.program,
            &[
                "pr",
                "create",
                "--title",
                &pr.title,
                "--body-file",
                &body_path,
                "--base",
                &pr.base,
                "--head",
                &pr.head,
            ],
            CommandMode::Tolerant,
        )
        .await
    }

    async fn enable_auto_merge(&self, branch: &str) -> Result<CommandOutput> {
        run_command(
            &self.workdir,
            &self.program,
            &["pr", "merge", branch, "--merge", "--auto", "--delete-branch"],
            CommandMode::Tolerant,
        )
        .await
    }
}
