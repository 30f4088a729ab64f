//! Test doubles and git fixtures shared by the runner tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;

use git_ops::{git_checked, CodeHost, CommandOutput, GitError, PullRequest, Repository};

/// Repository with one commit on `main`
pub(crate) async fn init_repo() -> TempDir {
    let dir = TempDir::new().unwrap();
    let setup: [&[&str]; 5] = [
        &["init"],
        &["config", "user.email", "test@test.com"],
        &["config", "user.name", "Test"],
        &["config", "commit.gpgsign", "false"],
        &["checkout", "-B", "main"],
    ];
    for args in setup {
        git_checked(dir.path(), args).await.unwrap();
    }

    tokio::fs::write(dir.path().join("README.md"), "init")
        .await
        .unwrap();
    git_checked(dir.path(), &["add", "."]).await.unwrap();
    git_checked(dir.path(), &["commit", "-m", "Initial commit"])
        .await
        .unwrap();
    dir
}

/// Bare repository registered as `origin` of `repo`
pub(crate) async fn add_bare_origin(repo: &Path) -> TempDir {
    let bare = TempDir::new().unwrap();
    git_checked(bare.path(), &["init", "--bare"]).await.unwrap();
    let url = bare.path().to_string_lossy().into_owned();
    git_checked(repo, &["remote", "add", "origin", &url])
        .await
        .unwrap();
    bare
}

/// Lines of stdout from a git command
pub(crate) async fn git_lines(repo: &Path, args: &[&str]) -> Vec<String> {
    git_checked(repo, args)
        .await
        .unwrap()
        .lines()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

/// How [`FakeHost`] answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostBehavior {
    Accept,
    Reject,
    Unreachable,
}

/// In-memory code host that records every call
pub(crate) struct FakeHost {
    behavior: HostBehavior,
    calls: Mutex<Vec<String>>,
}

impl FakeHost {
    pub fn new(behavior: HostBehavior) -> Self {
        Self {
            behavior,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, call: String) -> git_ops::Result<CommandOutput> {
        self.calls.lock().unwrap().push(call.clone());
        match self.behavior {
            HostBehavior::Accept => Ok(CommandOutput {
                stdout: "https://example.test/pull/1\n".to_string(),
                stderr: String::new(),
                code: Some(0),
                success: true,
            }),
            HostBehavior::Reject => Ok(CommandOutput {
                stdout: String::new(),
                stderr: "a pull request already exists\n".to_string(),
                code: Some(1),
                success: false,
            }),
            HostBehavior::Unreachable => Err(GitError::SpawnFailed {
                command: call,
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "gh not found"),
            }),
        }
    }
}

#[async_trait]
impl CodeHost for FakeHost {
    async fn create_pull_request(&self, pr: &PullRequest) -> git_ops::Result<CommandOutput> {
        self.answer(format!(
            "pr create {} -> {}: {} | {}",
            pr.head, pr.base, pr.title, pr.body
        ))
    }

    async fn enable_auto_merge(&self, branch: &str) -> git_ops::Result<CommandOutput> {
        self.answer(format!("pr merge {}", branch))
    }
}

#[derive(Default)]
struct FakeState {
    branches: HashSet<String>,
    files: HashMap<PathBuf, String>,
    dirty: bool,
    fail_push: bool,
    ops: Vec<String>,
}

/// In-memory repository that logs each operation in order
pub(crate) struct FakeRepository {
    state: Mutex<FakeState>,
}

impl FakeRepository {
    pub fn new() -> Self {
        let mut state = FakeState::default();
        state.branches.insert("main".to_string());
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_branch(self, branch: &str) -> Self {
        self.state.lock().unwrap().branches.insert(branch.to_string());
        self
    }

    pub fn failing_push(self) -> Self {
        self.state.lock().unwrap().fail_push = true;
        self
    }

    pub fn ops(&self) -> Vec<String> {
        self.state.lock().unwrap().ops.clone()
    }

    fn record(&self, op: String) {
        self.state.lock().unwrap().ops.push(op);
    }
}

#[async_trait]
impl Repository for FakeRepository {
    async fn checkout(&self, branch: &str) -> git_ops::Result<()> {
        self.record(format!("checkout {}", branch));
        if self.state.lock().unwrap().branches.contains(branch) {
            Ok(())
        } else {
            Err(GitError::command_failed(
                format!("git checkout {}", branch),
                Some(1),
                "pathspec did not match",
            ))
        }
    }

    async fn branch_exists(&self, branch: &str) -> bool {
        self.state.lock().unwrap().branches.contains(branch)
    }

    async fn create_branch(&self, branch: &str) -> git_ops::Result<()> {
        self.record(format!("create {}", branch));
        self.state.lock().unwrap().branches.insert(branch.to_string());
        Ok(())
    }

    async fn write_file(&self, path: &Path, content: &str) -> git_ops::Result<()> {
        self.record(format!("write {}", path.display()));
        let mut state = self.state.lock().unwrap();
        if state.files.get(path).map(String::as_str) != Some(content) {
            state.files.insert(path.to_path_buf(), content.to_string());
            state.dirty = true;
        }
        Ok(())
    }

    async fn stage_all(&self) -> git_ops::Result<()> {
        self.record("stage".to_string());
        Ok(())
    }

    async fn has_staged_changes(&self) -> git_ops::Result<bool> {
        Ok(self.state.lock().unwrap().dirty)
    }

    async fn commit(&self, message: &str) -> git_ops::Result<()> {
        self.record(format!("commit {}", message));
        self.state.lock().unwrap().dirty = false;
        Ok(())
    }

    async fn push(&self, remote: &str, branch: &str) -> git_ops::Result<()> {
        self.record(format!("push {} {}", remote, branch));
        if self.state.lock().unwrap().fail_push {
            return Err(GitError::command_failed(
                format!("git push {} {}", remote, branch),
                Some(128),
                "could not read from remote repository",
            ));
        }
        Ok(())
    }

    async fn merge_no_ff(&self, branch: &str, message: &str) -> git_ops::Result<()> {
        self.record(format!("merge {} ({})", branch, message));
        Ok(())
    }
}
