//! Repository handle
//!
//! Every operation the runner performs on the working tree goes through a
//! [`Repository`], so the checked-out branch is state owned by the handle
//! rather than something implicit in the process.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::commands::{branch_exists, git, is_git_repository, CommandMode};
use crate::error::{GitError, Result};
use crate::message_file::MessageFile;

/// Working-tree operations needed to apply a task
#[async_trait]
pub trait Repository: Send + Sync {
    /// Switch the working tree to an existing branch
    async fn checkout(&self, branch: &str) -> Result<()>;

    /// Check for a local branch; a failed check counts as "does not exist"
    async fn branch_exists(&self, branch: &str) -> bool;

    /// Create a branch from the current tip and switch to it
    async fn create_branch(&self, branch: &str) -> Result<()>;

    /// Overwrite a file relative to the repository root
    async fn write_file(&self, path: &Path, content: &str) -> Result<()>;

    /// Stage every working-tree change, including deletions
    async fn stage_all(&self) -> Result<()>;

    /// True if the index or working tree differs from HEAD
    async fn has_staged_changes(&self) -> Result<bool>;

    /// Commit the index with `message`
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push a branch to a remote
    async fn push(&self, remote: &str, branch: &str) -> Result<()>;

    /// Merge `branch` into the current branch, always creating a merge commit
    async fn merge_no_ff(&self, branch: &str, message: &str) -> Result<()>;
}

/// [`Repository`] backed by the `git` command line
#[derive(Debug, Clone)]
pub struct GitRepository {
    root: PathBuf,
}

impl GitRepository {
    /// Open the working tree at `root`
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();

        if !is_git_repository(&root).await? {
            return Err(GitError::NotAGitRepository { path: root });
        }

        Ok(Self { root })
    }

    /// Get the repository path
    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn strict(&self, args: &[&str]) -> Result<String> {
        Ok(git(&self.root, args, CommandMode::Strict).await?.stdout)
    }
}

#[async_trait]
impl Repository for GitRepository {
    async fn checkout(&self, branch: &str) -> Result<()> {
        self.strict(&["checkout", branch]).await?;
        Ok(())
    }

    async fn branch_exists(&self, branch: &str) -> bool {
        match branch_exists(&self.root, branch).await {
            Ok(exists) => exists,
            Err(e) => {
                warn!("Could not check branch {}: {}", branch, e);
                false
            }
        }
    }

    async fn create_branch(&self, branch: &str) -> Result<()> {
        self.strict(&["checkout", "-b", branch]).await?;
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        taskline_core::fs::write_file(&self.root.join(path), content).await?;
        Ok(())
    }

    async fn stage_all(&self) -> Result<()> {
        self.strict(&["add", "-A"]).await?;
        Ok(())
    }

    async fn has_staged_changes(&self) -> Result<bool> {
        let status = self.strict(&["status", "--porcelain"]).await?;
        Ok(!status.trim().is_empty())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        let file = MessageFile::create("taskline-commit-", message)?;
        let path = file.arg();
        debug!("Committing with message file {}", path);
        self.strict(&["commit", "-F", &path]).await?;
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<()> {
        self.strict(&["push", remote, branch]).await?;
        Ok(())
    }

    async fn merge_no_ff(&self, branch: &str, message: &str) -> Result<()> {
        self.strict(&["merge", "--no-ff", "-m", message, branch]).await?;
        Ok(())
    }
}
