//! Task list loading
//!
//! A task list is a JSON array of task records, applied top to bottom.

use std::path::Path;
use tracing::debug;

use super::model::{normalize_branch, Task};
use crate::{Error, Result};

/// Ordered sequence of tasks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Build a list from already constructed tasks, validating each one
    pub fn new(tasks: Vec<Task>) -> Result<Self> {
        let tasks = tasks
            .into_iter()
            .map(|mut task| {
                task.branch = normalize_branch(&task.branch);
                task
            })
            .collect::<Vec<_>>();

        for (i, task) in tasks.iter().enumerate() {
            if let Some(reason) = task.problem() {
                return Err(Error::invalid_task(i + 1, reason));
            }
        }

        Ok(Self { tasks })
    }

    /// Parse a list from its JSON text
    pub fn from_json(content: &str) -> Result<Self> {
        let tasks: Vec<Task> = serde_json::from_str(content)?;
        Self::new(tasks)
    }

    /// Read and parse a task list file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await?;
        let list = Self::from_json(&content)?;
        debug!("Loaded {} tasks from {:?}", list.len(), path);
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
