//! Run settings resolved from flags and environment
//!
//! Flags win over environment variables, which win over defaults.

use std::path::PathBuf;
use task_runner::{PublishMode, RunnerConfig};

use crate::cli::Args;

#[derive(Debug, Clone)]
pub struct Settings {
    pub tasks: PathBuf,
    pub repo: PathBuf,
    pub runner: RunnerConfig,
    pub gh_bin: Option<String>,
    pub report: Option<PathBuf>,
}

fn parse_flag(raw: &str, default: bool) -> bool {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => default,
    }
}

impl Settings {
    /// Resolve settings, reading environment variables through `env`
    pub fn resolve(args: Args, env: impl Fn(&str) -> Option<String>) -> Self {
        let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());
        let defaults = RunnerConfig::default();

        let local = args.local
            || var("TASKLINE_LOCAL")
                .map(|raw| parse_flag(&raw, false))
                .unwrap_or(false);

        Self {
            tasks: args.tasks,
            repo: args
                .repo
                .or_else(|| var("TASKLINE_REPO").map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(".")),
            runner: RunnerConfig {
                trunk: args
                    .trunk
                    .or_else(|| var("TASKLINE_TRUNK"))
                    .unwrap_or(defaults.trunk),
                remote: args
                    .remote
                    .or_else(|| var("TASKLINE_REMOTE"))
                    .unwrap_or(defaults.remote),
                mode: if local {
                    PublishMode::Local
                } else {
                    PublishMode::Remote
                },
            },
            gh_bin: args.gh_bin.or_else(|| var("TASKLINE_GH_BIN")),
            report: args.report,
        }
    }
}
