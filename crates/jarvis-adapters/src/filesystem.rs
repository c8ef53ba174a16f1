//! Filesystem collaborator -- create, delete and open files.
//!
//! Paths are used exactly as given.  Whether the assistant should confine
//! voice-driven file operations to a root directory is still an open
//! question, so no traversal checks happen here.

use std::path::Path;
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{AdapterError, Result};
use crate::platform::Platform;
use crate::traits::FileSystem;

/// Filesystem backed by `tokio::fs` and the platform file opener.
pub struct LocalFileSystem {
    platform: Platform,
}

impl LocalFileSystem {
    /// Create a filesystem collaborator for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl FileSystem for LocalFileSystem {
    async fn create_empty(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "creating empty file");
        tokio::fs::write(path, b"").await?;
        info!(path = %path.display(), "file created");
        Ok(())
    }

    async fn remove(&self, path: &Path) -> Result<()> {
        debug!(path = %path.display(), "removing file");
        tokio::fs::remove_file(path).await?;
        info!(path = %path.display(), "file removed");
        Ok(())
    }

    async fn open_with_default_app(&self, path: &Path) -> Result<()> {
        let target = path.display().to_string();
        if target.is_empty() {
            return Err(AdapterError::InvalidInput("empty path".into()));
        }

        self.platform
            .opener_command(&target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| AdapterError::ExecutionFailed {
                operation: format!("opening `{target}`"),
                reason: e.to_string(),
            })?;

        info!(path = %target, "file handed to default application");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        let fs = LocalFileSystem::new(Platform::Linux);

        fs.create_empty(&path).await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), Vec::<u8>::new());

        fs.remove(&path).await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn create_truncates_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        std::fs::write(&path, "old contents").unwrap();

        LocalFileSystem::new(Platform::Linux)
            .create_empty(&path)
            .await
            .unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);
    }

    #[tokio::test]
    async fn remove_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = LocalFileSystem::new(Platform::Linux)
            .remove(&dir.path().join("nope.txt"))
            .await;
        assert!(matches!(result, Err(AdapterError::Io(_))));
    }
}
