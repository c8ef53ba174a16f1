//! Browser collaborator -- hand URLs to the desktop's default browser.
//!
//! On WSL the URL goes through `cmd.exe /c start` so that the Windows
//! browser opens it; that path waits for `cmd.exe` to return.  Everywhere
//! else the opener is spawned and left running.

use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{AdapterError, Result};
use crate::platform::Platform;
use crate::traits::Browser;

/// Browser backed by the platform's URL opener.
pub struct SystemBrowser {
    platform: Platform,
}

impl SystemBrowser {
    /// Create a browser for the given platform.
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }
}

#[async_trait]
impl Browser for SystemBrowser {
    async fn open(&self, url: &str) -> Result<bool> {
        if url.trim().is_empty() {
            return Err(AdapterError::InvalidInput("empty url".into()));
        }

        let mut cmd = self.platform.opener_command(url);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        debug!(url, platform = %self.platform, "opening url");

        if self.platform == Platform::Wsl {
            // The exit status of `start` is not meaningful, only the spawn is.
            cmd.status()
                .await
                .map_err(|e| AdapterError::ExecutionFailed {
                    operation: "opening browser through cmd.exe".into(),
                    reason: e.to_string(),
                })?;
        } else {
            cmd.spawn().map_err(|e| AdapterError::ExecutionFailed {
                operation: "opening browser".into(),
                reason: e.to_string(),
            })?;
        }

        info!(url, "url opened");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_url_is_rejected() {
        let browser = SystemBrowser::new(Platform::Linux);
        let result = browser.open("  ").await;
        assert!(matches!(result, Err(AdapterError::InvalidInput(_))));
    }
}
