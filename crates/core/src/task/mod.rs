//! Task module
//!
//! This module contains the task model and task list loading.

mod list;
mod model;

pub use list::TaskList;
pub use model::*;
