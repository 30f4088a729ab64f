//! Command execution utilities

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{info, trace};

use crate::error::{GitError, Result};

/// How a non-zero exit status is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandMode {
    /// Non-zero exit is an error
    Strict,
    /// Non-zero exit is returned in the output for the caller to inspect
    Tolerant,
}

/// Output from an external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: Option<i32>,
    pub success: bool,
}

/// Render a command line for logs and error messages
pub(crate) fn display_command(program: &str, args: &[&str]) -> String {
    std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Execute an external command in the specified directory
///
/// Failing to start the process is always an error. A non-zero exit is an
/// error only in [`CommandMode::Strict`].
pub async fn run_command(
    dir: &Path,
    program: &str,
    args: &[&str],
    mode: CommandMode,
) -> Result<CommandOutput> {
    let command = display_command(program, args);
    info!("Running: {}", command);
    trace!("in {:?}", dir);

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|source| GitError::SpawnFailed {
            command: command.clone(),
            source,
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    trace!("{} stdout: {}", program, stdout);
    if !stderr.is_empty() {
        trace!("{} stderr: {}", program, stderr);
    }

    let result = CommandOutput {
        stdout,
        stderr,
        code: output.status.code(),
        success: output.status.success(),
    };

    if !result.success && mode == CommandMode::Strict {
        return Err(GitError::command_failed(
            command,
            result.code,
            result.stderr.trim(),
        ));
    }

    Ok(result)
}

/// Execute a git command in the specified directory
pub async fn git(repo_path: &Path, args: &[&str], mode: CommandMode) -> Result<CommandOutput> {
    run_command(repo_path, "git", args, mode).await
}

/// Execute a git command and return its stdout, failing on non-zero exit
pub async fn git_checked(repo_path: &Path, args: &[&str]) -> Result<String> {
    Ok(git(repo_path, args, CommandMode::Strict).await?.stdout)
}

/// Check if a path is inside a git working tree
pub async fn is_git_repository(path: &Path) -> Result<bool> {
    let output = git(path, &["rev-parse", "--git-dir"], CommandMode::Tolerant).await?;
    Ok(output.success)
}

/// Check if a local branch exists
pub async fn branch_exists(repo_path: &Path, branch: &str) -> Result<bool> {
    let output = git(
        repo_path,
        &["rev-parse", "--verify", "--quiet", &format!("refs/heads/{}", branch)],
        CommandMode::Tolerant,
    )
    .await?;
    Ok(output.success)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Repository with one commit on `main`
    pub(crate) async fn init_test_repo() -> TempDir {
        let dir = TempDir::new().unwrap();
        git_checked(dir.path(), &["init"]).await.unwrap();
        git_checked(dir.path(), &["config", "user.email", "test@test.com"])
            .await
            .unwrap();
        git_checked(dir.path(), &["config", "user.name", "Test"])
            .await
            .unwrap();
        git_checked(dir.path(), &["config", "commit.gpgsign", "false"])
            .await
            .unwrap();
        git_checked(dir.path(), &["checkout", "-B", "main"])
            .await
            .unwrap();

        tokio::fs::write(dir.path().join("README.md"), "init")
            .await
            .unwrap();
        git_checked(dir.path(), &["add", "."]).await.unwrap();
        git_checked(dir.path(), &["commit", "-m", "Initial commit"])
            .await
            .unwrap();

        dir
    }

    #[tokio::test]
    async fn test_is_git_repository() {
        let dir = init_test_repo().await;
        assert!(is_git_repository(dir.path()).await.unwrap());

        let non_git = TempDir::new().unwrap();
        assert!(!is_git_repository(non_git.path()).await.unwrap());
    }

    #[tokio::test]
    async fn test_branch_exists() {
        let dir = init_test_repo().await;
        assert!(branch_exists(dir.path(), "main").await.unwrap());
        assert!(!branch_exists(dir.path(), "nonexistent").await.unwrap());
    }

    #[tokio::test]
    async fn test_strict_failure_is_error() {
        let dir = init_test_repo().await;
        let result = git(dir.path(), &["checkout", "missing-branch"], CommandMode::Strict).await;
        match result {
            Err(GitError::CommandFailed { command, code, .. }) => {
                assert_eq!(command, "git checkout missing-branch");
                assert_ne!(code, Some(0));
            }
            other => panic!("expected CommandFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_tolerant_failure_is_returned() {
        let dir = init_test_repo().await;
        let output = git(dir.path(), &["checkout", "missing-branch"], CommandMode::Tolerant)
            .await
            .unwrap();
        assert!(!output.success);
        assert!(!output.stderr.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_failure_is_error_in_both_modes() {
        let dir = TempDir::new().unwrap();
        for mode in [CommandMode::Strict, CommandMode::Tolerant] {
            let result = run_command(dir.path(), "taskline-no-such-binary", &[], mode).await;
            assert!(matches!(result, Err(GitError::SpawnFailed { .. })));
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_command_is_logged_at_info_before_it_runs() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        // The binary never starts, so the line must be written beforehand
        let dir = TempDir::new().unwrap();
        let result = run_command(
            dir.path(),
            "taskline-no-such-binary",
            &["--flag", "value"],
            CommandMode::Tolerant,
        )
        .await;
        assert!(result.is_err());

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("INFO"));
        assert!(output.contains("Running: taskline-no-such-binary --flag value"));
    }

    #[test]
    fn test_display_command() {
        assert_eq!(
            display_command("git", &["merge", "--no-ff", "feat/x"]),
            "git merge --no-ff feat/x"
        );
    }
}
