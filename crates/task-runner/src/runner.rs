//! Task runner - applies a task list to a repository one task at a time

use std::path::PathBuf;
use tracing::{info, warn};

use git_ops::{CodeHost, GhCli, GitError, GitRepository, PullRequest, Repository};
use taskline_core::task::{Task, TaskList};

use crate::config::{PublishMode, RunnerConfig};
use crate::error::{Result, RunnerError};
use crate::outcome::{CommitOutcome, PublishOutcome, RunReport, TaskOutcome};

/// Drives every task through sync, branch, apply, commit and publish
///
/// Tasks are processed strictly in order against a single working tree.
/// The first fatal error stops the run and leaves the tree where it failed.
pub struct TaskRunner<R, H> {
    config: RunnerConfig,
    repo: R,
    host: H,
}

impl TaskRunner<GitRepository, GhCli> {
    /// Runner for the git working tree at `repo_path`, publishing through `gh`
    pub async fn open(
        repo_path: impl Into<PathBuf>,
        config: RunnerConfig,
        gh_program: Option<String>,
    ) -> Result<Self> {
        let repo = GitRepository::open(repo_path).await?;
        let mut host = GhCli::new(repo.root());
        if let Some(program) = gh_program {
            host = host.with_program(program);
        }
        Ok(Self::new(config, repo, host))
    }
}

impl<R: Repository, H: CodeHost> TaskRunner<R, H> {
    pub fn new(config: RunnerConfig, repo: R, host: H) -> Self {
        Self { config, repo, host }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Apply every task in order
    pub async fn run(&self, tasks: &TaskList) -> Result<RunReport> {
        let total = tasks.len();
        let mut report = RunReport::default();

        for (i, task) in tasks.iter().enumerate() {
            let index = i + 1;
            info!("Processing task {}/{}: {}", index, total, task.branch);
            let outcome = self.run_task(index, task).await?;
            info!("Completed task {}/{}", index, total);
            report.outcomes.push(outcome);
        }

        Ok(report)
    }

    /// Apply a single task; `index` is its 1-based position for reporting
    pub async fn run_task(&self, index: usize, task: &Task) -> Result<TaskOutcome> {
        let fail = move |step: &'static str| {
            move |e: GitError| RunnerError::task(index, &task.branch, step, e)
        };

        self.repo
            .checkout(&self.config.trunk)
            .await
            .map_err(fail("trunk sync"))?;

        self.resolve_branch(&task.branch)
            .await
            .map_err(fail("branch checkout"))?;

        for change in &task.changes {
            self.repo
                .write_file(&change.path, &change.content)
                .await
                .map_err(fail("apply changes"))?;
        }

        let commit = self.commit(task).await.map_err(fail("commit"))?;

        let publish = match self.config.mode {
            PublishMode::Local => {
                self.merge_into_trunk(task)
                    .await
                    .map_err(fail("local merge"))?;
                PublishOutcome::MergedLocally
            }
            PublishMode::Remote => match self.publish_remote(task).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(
                        "Remote operation failed for {}: {}; merging locally instead",
                        task.branch, e
                    );
                    self.merge_into_trunk(task)
                        .await
                        .map_err(fail("fallback merge"))?;
                    PublishOutcome::FellBack {
                        reason: e.to_string(),
                    }
                }
            },
        };

        Ok(TaskOutcome {
            index,
            branch: task.branch.clone(),
            commit,
            publish,
        })
    }

    /// Switch to the task branch, creating it from trunk if it is new
    async fn resolve_branch(&self, branch: &str) -> git_ops::Result<()> {
        if self.repo.branch_exists(branch).await {
            info!("Resuming existing branch {}", branch);
            self.repo.checkout(branch).await
        } else {
            self.repo.create_branch(branch).await
        }
    }

    async fn commit(&self, task: &Task) -> git_ops::Result<CommitOutcome> {
        self.repo.stage_all().await?;

        if !self.repo.has_staged_changes().await? {
            info!("No changes to commit on {}, skipping", task.branch);
            return Ok(CommitOutcome::NoChanges);
        }

        self.repo.commit(&task.commit_msg).await?;
        Ok(CommitOutcome::Committed)
    }

    async fn merge_into_trunk(&self, task: &Task) -> git_ops::Result<()> {
        self.repo.checkout(&self.config.trunk).await?;
        self.repo
            .merge_no_ff(&task.branch, &task.merge_message())
            .await
    }

    /// Push, then best-effort PR creation and auto-merge
    ///
    /// Non-zero exits from the code host are logged and recorded. Only a
    /// failed push or a host that cannot be reached comes back as `Err`.
    async fn publish_remote(&self, task: &Task) -> git_ops::Result<PublishOutcome> {
        self.repo.push(&self.config.remote, &task.branch).await?;

        let pr = PullRequest {
            title: task.pr_title().to_string(),
            body: task.pr_body(),
            base: self.config.trunk.clone(),
            head: task.branch.clone(),
        };
        let created = self.host.create_pull_request(&pr).await?;
        if !created.success {
            warn!(
                "Could not open pull request for {}: {}",
                task.branch,
                created.stderr.trim()
            );
        }

        let merged = self.host.enable_auto_merge(&task.branch).await?;
        if !merged.success {
            warn!(
                "Could not enable auto-merge for {}: {}",
                task.branch,
                merged.stderr.trim()
            );
        }

        Ok(PublishOutcome::Published {
            pull_request_opened: created.success,
            auto_merge_enabled: merged.success,
        })
    }
}
