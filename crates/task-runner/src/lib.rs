//! Task Runner - replays a task list as branches, commits and merges
//!
//! Each task is applied on its own branch cut from trunk, committed, and
//! then either merged back locally or pushed with a best-effort pull
//! request, falling back to a local merge when the remote is unavailable.

mod config;
mod error;
mod outcome;
mod runner;

#[cfg(test)]
mod testing;

pub use config::{PublishMode, RunnerConfig};
pub use error::{Result, RunnerError};
pub use outcome::{CommitOutcome, PublishOutcome, RunReport, TaskOutcome};
pub use runner::TaskRunner;
