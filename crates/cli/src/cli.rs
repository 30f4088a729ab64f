use clap::Parser;
use std::path::PathBuf;

/// Replay a task list as branches, commits and pull requests
#[derive(Parser, Debug)]
#[command(name = "taskline")]
#[command(version)]
pub struct Args {
    /// Path to the JSON task list
    pub tasks: PathBuf,

    /// Merge each task into trunk locally instead of pushing it
    #[arg(long)]
    pub local: bool,

    /// Working tree to apply tasks to [env: TASKLINE_REPO, default: .]
    #[arg(long)]
    pub repo: Option<PathBuf>,

    /// Trunk branch [env: TASKLINE_TRUNK, default: main]
    #[arg(long)]
    pub trunk: Option<String>,

    /// Remote to push task branches to [env: TASKLINE_REMOTE, default: origin]
    #[arg(long)]
    pub remote: Option<String>,

    /// GitHub CLI executable [env: TASKLINE_GH_BIN, default: gh]
    #[arg(long)]
    pub gh_bin: Option<String>,

    /// Write a JSON report of every task outcome to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}
