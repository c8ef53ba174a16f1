//! Screen capture through whichever command-line tool the host provides.
//!
//! Capture is optional: [`CommandScreenCapture::detect`] returns `None` when
//! no supported tool is on `PATH`, and the dispatcher then reports the
//! capability as unavailable instead of failing hard.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::error::{AdapterError, Result};
use crate::platform::Platform;
use crate::traits::ScreenCapture;

/// Supported tools per platform as `(program, args before the path)`.
const MACOS_TOOLS: &[(&str, &[&str])] = &[("screencapture", &["-x"])];
const LINUX_TOOLS: &[(&str, &[&str])] = &[
    ("gnome-screenshot", &["-f"]),
    ("grim", &[]),
    ("scrot", &["-o"]),
];

/// Screen capture that shells out to a detected tool.
#[derive(Debug, Clone)]
pub struct CommandScreenCapture {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandScreenCapture {
    /// Find a capture tool for `platform` on the current `PATH`.
    pub fn detect(platform: Platform) -> Option<Self> {
        let path = std::env::var_os("PATH")?;
        let dirs: Vec<PathBuf> = std::env::split_paths(&path).collect();
        Self::detect_in(platform, &dirs)
    }

    /// Find a capture tool for `platform` in the given directories.
    pub fn detect_in(platform: Platform, dirs: &[PathBuf]) -> Option<Self> {
        let tools = match platform {
            Platform::MacOs => MACOS_TOOLS,
            Platform::Linux | Platform::Wsl => LINUX_TOOLS,
            Platform::Windows | Platform::Other => &[],
        };

        tools.iter().find_map(|(program, args)| {
            let found = dirs
                .iter()
                .map(|dir| dir.join(program))
                .find(|candidate| candidate.is_file())?;
            debug!(tool = %found.display(), "screen capture tool detected");
            Some(Self {
                program: found,
                args: args.iter().map(|a| (*a).to_owned()).collect(),
            })
        })
    }

    /// The resolved tool path.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

#[async_trait]
impl ScreenCapture for CommandScreenCapture {
    async fn capture(&self, path: &Path) -> Result<()> {
        let output = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| AdapterError::ExecutionFailed {
                operation: "screen capture".into(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(AdapterError::ExecutionFailed {
                operation: "screen capture".into(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        info!(path = %path.display(), "screenshot captured");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_finds_first_supported_tool() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scrot"), b"").unwrap();
        std::fs::write(dir.path().join("grim"), b"").unwrap();

        let capture =
            CommandScreenCapture::detect_in(Platform::Linux, &[dir.path().to_path_buf()]).unwrap();
        // grim is listed before scrot.
        assert_eq!(capture.program(), dir.path().join("grim"));
    }

    #[test]
    fn detect_returns_none_without_tools() {
        let dir = tempfile::tempdir().unwrap();
        assert!(
            CommandScreenCapture::detect_in(Platform::Linux, &[dir.path().to_path_buf()])
                .is_none()
        );
        assert!(
            CommandScreenCapture::detect_in(Platform::Windows, &[dir.path().to_path_buf()])
                .is_none()
        );
    }
}
