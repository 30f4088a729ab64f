//! taskline - replays a task list against a git repository
//!
//! Each task becomes a branch and a commit, then is merged into trunk
//! locally (`--local`) or pushed with a pull request set to auto-merge.

mod cli;
mod config;

use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;
use crate::config::Settings;
use task_runner::TaskRunner;
use taskline_core::task::TaskList;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "taskline=info,task_runner=info,git_ops=info,taskline_core=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::resolve(Args::parse(), |name| std::env::var(name).ok());

    let result = run(settings).await;
    if let Err(e) = &result {
        tracing::error!("{:#}", e);
    }
    ExitCode::from(exit_status(&result))
}

/// 0 when every task completed, 1 when a fatal error stopped the run
fn exit_status(result: &anyhow::Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

async fn run(settings: Settings) -> anyhow::Result<()> {
    let tasks = TaskList::load(&settings.tasks)
        .await
        .with_context(|| format!("Failed to load task list {:?}", settings.tasks))?;

    tracing::info!(
        "Loaded {} tasks; trunk {}, {:?} mode, repository {:?}",
        tasks.len(),
        settings.runner.trunk,
        settings.runner.mode,
        settings.repo
    );

    let runner = TaskRunner::open(&settings.repo, settings.runner.clone(), settings.gh_bin)
        .await
        .context("Failed to open repository")?;

    let report = runner.run(&tasks).await?;

    tracing::info!(
        "Finished {} tasks: {} committed, {} unchanged, {} merged locally after remote failure, {} with pull request warnings",
        report.outcomes.len(),
        report.committed(),
        report.no_ops(),
        report.fallbacks(),
        report.remote_warnings()
    );

    if let Some(path) = settings.report {
        report
            .write_json(&path)
            .await
            .with_context(|| format!("Failed to write report {:?}", path))?;
        tracing::info!("Report written to {:?}", path);
    }

    Ok(())
}
