//! File writer used to apply task changes

use std::path::Path;
use tracing::debug;

use crate::Result;

/// Write `content` to `path`, replacing whatever was there.
///
/// Missing ancestor directories are created first. Any I/O failure is
/// returned to the caller unchanged.
pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    debug!("Writing {} bytes to {:?}", content.len(), path);
    tokio::fs::write(path, content).await?;
    Ok(())
}
