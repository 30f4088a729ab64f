//! Scoped temporary files for commit messages and PR bodies
//!
//! Text is handed to git and gh through a file rather than an argument so
//! that quotes, newlines and leading dashes survive untouched.

use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::Result;

/// A temporary file holding message text, deleted when dropped
#[derive(Debug)]
pub struct MessageFile {
    file: NamedTempFile,
}

impl MessageFile {
    /// Write `contents` to a new file in the system temp directory
    pub fn create(prefix: &str, contents: &str) -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(prefix)
            .suffix(".txt")
            .tempfile()?;
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Path as a command argument
    pub fn arg(&self) -> String {
        self.path().to_string_lossy().into_owned()
    }
}
