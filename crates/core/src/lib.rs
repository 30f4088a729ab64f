//! Core library for taskline
//!
//! This crate contains the pieces every other crate builds on:
//! - The task model and task list loading
//! - The file writer used to apply task changes

pub mod error;
pub mod fs;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
