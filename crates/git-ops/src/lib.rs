//! Git and code-host plumbing
//!
//! This crate runs the external `git` and `gh` commands that apply a task
//! to a working tree and publish it, behind the [`Repository`] and
//! [`CodeHost`] traits.

mod commands;
mod error;
mod host;
mod message_file;
mod repository;

pub use commands::{git, git_checked, run_command, CommandMode, CommandOutput};
pub use error::{GitError, Result};
pub use host::{CodeHost, GhCli, PullRequest};
pub use message_file::MessageFile;
pub use repository::{GitRepository, Repository};
